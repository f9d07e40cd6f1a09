use ecma_unparse::ast::Program;
use ecma_unparse::Codegen;
use miette::{IntoDiagnostic, Result};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::RenderConfig;
use crate::error::Error;

/// Arguments of `unparse render`.
#[derive(Debug, Clone)]
pub struct RenderArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub pretty: bool,
    pub web_safe: bool,
    pub no_hex: bool,
}

/// Run the render command.
///
/// Reads a Shift-JSON AST from `args.input` (`-` for stdin) and writes the
/// generated source to `args.output` or stdout.
pub fn run(cwd: &Path, args: &RenderArgs) -> Result<()> {
    let source = render(cwd, args).into_diagnostic()?;
    match &args.output {
        Some(path) => {
            let path = cwd.join(path);
            std::fs::write(&path, source.as_bytes()).into_diagnostic()?;
            info!(path = %path.display(), bytes = source.len(), "wrote output");
        }
        None => {
            let mut out = io::stdout().lock();
            writeln!(out, "{source}").into_diagnostic()?;
        }
    }
    Ok(())
}

/// Load config, read and parse the AST, and generate source text.
pub fn render(cwd: &Path, args: &RenderArgs) -> Result<String, Error> {
    let config = match &args.config {
        Some(path) => RenderConfig::load(&cwd.join(path))?,
        None => RenderConfig::default(),
    };
    let config = config
        .with_pretty(args.pretty)
        .with_web_safe(args.web_safe)
        .with_no_hex(args.no_hex);
    debug!(options = ?config.codegen, "render options");

    let (path, text) = read_input(cwd, &args.input)?;
    let program = Program::from_json(&text).map_err(|source| Error::ParseAst { path, source })?;

    let source = Codegen::new(config.codegen).generate(&program)?;
    Ok(source)
}

fn read_input(cwd: &Path, input: &Path) -> Result<(PathBuf, String), Error> {
    if input == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| Error::ReadInput {
                path: input.to_path_buf(),
                source,
            })?;
        return Ok((input.to_path_buf(), text));
    }
    let path = cwd.join(input);
    let text = std::fs::read_to_string(&path).map_err(|source| Error::ReadInput {
        path: path.clone(),
        source,
    })?;
    Ok((path, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE: &str = r#"{
        "type": "Script",
        "directives": [],
        "statements": [{
            "type": "ExpressionStatement",
            "expression": {
                "type": "BinaryExpression",
                "operator": "+",
                "left": {"type": "IdentifierExpression", "name": "a"},
                "right": {"type": "LiteralNumericExpression", "value": 1000}
            }
        }]
    }"#;

    fn args(input: &str) -> RenderArgs {
        RenderArgs {
            input: PathBuf::from(input),
            output: None,
            config: None,
            pretty: false,
            web_safe: false,
            no_hex: false,
        }
    }

    #[test]
    fn test_render_relative_to_cwd() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tree.json"), TREE).unwrap();

        assert_eq!(render(dir.path(), &args("tree.json")).unwrap(), "a+1e3");

        let pretty = RenderArgs {
            pretty: true,
            ..args("tree.json")
        };
        assert_eq!(render(dir.path(), &pretty).unwrap(), "a + 1e3;");
    }

    #[test]
    fn test_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tree.json"), TREE).unwrap();
        std::fs::write(dir.path().join("unparse.json"), r#"{"codegen": {"pretty": true}}"#).unwrap();

        let with_config = RenderArgs {
            config: Some(PathBuf::from("unparse.json")),
            ..args("tree.json")
        };
        assert_eq!(render(dir.path(), &with_config).unwrap(), "a + 1e3;");
    }

    #[test]
    fn test_malformed_input() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), r#"{"type": "Script""#).unwrap();
        assert!(matches!(render(dir.path(), &args("bad.json")), Err(Error::ParseAst { .. })));
        assert!(matches!(render(dir.path(), &args("missing.json")), Err(Error::ReadInput { .. })));
    }
}
