//! Region arguments for the command-line tool

use birads_classify::default_region;
use birads_core::Rect;

/// Parse `X,Y,W,H`, or `X,Y` for a default-sized square at that corner.
pub fn parse_region(s: &str) -> Result<Rect, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [x, y] => {
            let x = x.parse().map_err(|_| format!("'{}' is not a non-negative integer", x))?;
            let y = y.parse().map_err(|_| format!("'{}' is not a non-negative integer", y))?;
            default_region(x, y).map_err(|e| e.to_string())
        }
        _ => s.parse::<Rect>().map_err(|e| e.to_string()),
    }
}
