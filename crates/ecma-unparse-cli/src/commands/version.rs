use ecma_unparse::version::{version_string, VERSION};
use miette::{IntoDiagnostic, Result};

pub fn run(json: bool) -> Result<()> {
    if json {
        let info = serde_json::json!({"name": "unparse", "version": VERSION});
        println!("{}", serde_json::to_string(&info).into_diagnostic()?);
    } else {
        println!("{}", version_string());
    }
    Ok(())
}
