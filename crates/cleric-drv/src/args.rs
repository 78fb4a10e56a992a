//! Hand-rolled argument scanning for the `cleric` CLI. The surface is small
//! enough — one mutually-exclusive stop-phase flag and one input path — that
//! pulling in an argument-parsing crate would add more than it would save.

use std::path::PathBuf;

use cleric_pipe::CompileFlags;

#[derive(Debug)]
pub struct Args {
    pub input: PathBuf,
    pub flags: CompileFlags,
}

#[derive(Debug)]
pub struct UsageError(pub String);

impl std::fmt::Display for UsageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for UsageError {}

pub fn parse(raw: &[String]) -> Result<Args, UsageError> {
    let mut flags = CompileFlags::default();
    let mut input = None;
    let mut stop_flags_seen = 0;

    for arg in raw {
        match arg.as_str() {
            "--lex" => {
                flags.lex_only = true;
                stop_flags_seen += 1;
            }
            "--parse" => {
                flags.parse_only = true;
                stop_flags_seen += 1;
            }
            "--validate" => {
                flags.validate_only = true;
                stop_flags_seen += 1;
            }
            "--tac" => {
                flags.tac_only = true;
                stop_flags_seen += 1;
            }
            "--codegen" => {
                flags.codegen_only = true;
                stop_flags_seen += 1;
            }
            other if other.starts_with('-') => {
                return Err(UsageError(format!("unrecognized option '{other}'")));
            }
            path if input.is_none() => {
                input = Some(PathBuf::from(path));
            }
            _ => {
                return Err(UsageError("exactly one input file may be given".to_string()));
            }
        }
    }

    if stop_flags_seen > 1 {
        return Err(UsageError(
            "--lex, --parse, --validate, --tac, and --codegen are mutually exclusive".to_string(),
        ));
    }

    let input = input.ok_or_else(|| UsageError("usage: cleric [--lex|--parse|--validate|--tac|--codegen] <input.c>".to_string()))?;

    Ok(Args { input, flags })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_input_path() {
        let args = parse(&["main.c".to_string()]).unwrap();
        assert_eq!(args.input, PathBuf::from("main.c"));
        assert!(!args.flags.lex_only);
    }

    #[test]
    fn parses_a_single_stop_flag() {
        let args = parse(&["--tac".to_string(), "main.c".to_string()]).unwrap();
        assert!(args.flags.tac_only);
    }

    #[test]
    fn rejects_two_stop_flags() {
        let err = parse(&["--lex".to_string(), "--parse".to_string(), "main.c".to_string()]).unwrap_err();
        assert!(err.0.contains("mutually exclusive"));
    }

    #[test]
    fn rejects_missing_input() {
        assert!(parse(&["--lex".to_string()]).is_err());
    }

    #[test]
    fn rejects_unknown_flag() {
        assert!(parse(&["--bogus".to_string(), "main.c".to_string()]).is_err());
    }
}
