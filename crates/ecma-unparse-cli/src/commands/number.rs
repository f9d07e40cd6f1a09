use ecma_unparse::{d2a, short_d2a};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

/// Both renderings of one double.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Formatted {
    pub value: String,
    pub d2a: String,
    pub short: String,
}

pub fn format(value: f64) -> Formatted {
    Formatted {
        value: value.to_string(),
        d2a: d2a(value),
        short: short_d2a(value),
    }
}

/// Run the number command.
///
/// With `json`, prints one JSON array of `{value, d2a, short}` objects;
/// otherwise one `value d2a short` line per input.
pub fn run(values: &[f64], json: bool) -> Result<()> {
    let rows: Vec<Formatted> = values.iter().copied().map(format).collect();
    if json {
        println!("{}", serde_json::to_string(&rows).into_diagnostic()?);
    } else {
        for row in &rows {
            println!("{} {} {}", row.value, row.d2a, row.short);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(
            format(1000.0),
            Formatted {
                value: "1000".to_string(),
                d2a: "1000".to_string(),
                short: "1e3".to_string(),
            }
        );
        assert_eq!(format(0.25).short, ".25");
        assert_eq!(format(1e21).d2a, "1e+21");
    }
}
