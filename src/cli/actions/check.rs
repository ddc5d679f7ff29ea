use super::session::print_json;
use crate::validation::{validate, Rule, Verdict};
use anyhow::Result;
use serde_json::Value;

#[derive(Debug)]
pub struct Args {
    pub rule: Rule,
    pub value: String,
}

fn verdict(args: &Args) -> Verdict {
    validate(args.rule, &Value::String(args.value.clone()))
}

/// Prints the verdict. An invalid value is still a successful run.
///
/// # Errors
/// Returns an error if the verdict cannot be written.
pub fn execute(args: &Args) -> Result<()> {
    print_json(&verdict(args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_reports_first_failure() {
        let args = Args {
            rule: Rule::Otp,
            value: "12 3456".to_string(),
        };
        assert_eq!(verdict(&args), Verdict::fail("Code may not contain spaces."));
    }

    #[test]
    fn verdict_accepts_valid_name() {
        let args = Args {
            rule: Rule::Name,
            value: "Ada Lovelace".to_string(),
        };
        assert_eq!(verdict(&args), Verdict::ok());
    }
}
