//! Command-line front end.
//!
//! Reads one intake as JSON from a file or stdin and renders the report.
//!
//! ```bash
//! crcscreen [--input <path>] [--format json|text] [--lang en|es] [--today YYYY-MM-DD]
//! ```

pub mod report;

use std::io::Read;
use std::path::PathBuf;

use crate::adapters::{FixedClock, SystemClock};
use crate::application::ScreeningService;
use crate::config::Settings;
use crate::domain::{Locale, ScreeningIntake};
use crate::ports::Clock;
use crate::CrcScreenError;

pub const USAGE: &str = "Usage: crcscreen [--input <path>] [--format json|text] [--lang en|es] [--today YYYY-MM-DD]\n\n\
Reads screening answers as JSON (from <path>, or stdin when omitted) and prints the recommended \
colorectal cancer screening strategy.";

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = CrcScreenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(CrcScreenError::Usage(format!(
                "Unknown format '{other}' (expected json or text)"
            ))),
        }
    }
}

/// Parsed command-line arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub input: Option<PathBuf>,
    pub format: OutputFormat,
    pub locale: Option<Locale>,
    pub today: Option<FixedClock>,
    pub help: bool,
}

impl CliArgs {
    /// Parse arguments (without the program name).
    ///
    /// # Errors
    /// Returns [`CrcScreenError::Usage`] for unknown flags or missing values.
    pub fn parse<I>(args: I) -> Result<Self, CrcScreenError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--input" | "-i" => parsed.input = Some(PathBuf::from(value_for(&arg, &mut args)?)),
                "--format" | "-f" => parsed.format = value_for(&arg, &mut args)?.parse()?,
                "--lang" => {
                    parsed.locale = Some(
                        value_for(&arg, &mut args)?
                            .parse()
                            .map_err(CrcScreenError::Usage)?,
                    );
                }
                "--today" => {
                    let date = value_for(&arg, &mut args)?;
                    parsed.today = Some(FixedClock::parse(&date).map_err(|e| {
                        CrcScreenError::Usage(format!("--today '{date}': {e}"))
                    })?);
                }
                "-h" | "--help" => parsed.help = true,
                _ => return Err(CrcScreenError::Usage(format!("Unknown arg: {arg}"))),
            }
        }

        Ok(parsed)
    }
}

fn value_for<I>(flag: &str, args: &mut I) -> Result<String, CrcScreenError>
where
    I: Iterator<Item = String>,
{
    args.next()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CrcScreenError::Usage(format!("{flag} requires a value")))
}

/// Evaluate one JSON intake and render the report.
///
/// Flags override settings from the environment.
///
/// # Errors
/// Returns an error if the JSON is malformed or the answers fail validation.
pub fn run_with<R>(args: &CliArgs, settings: &Settings, input: R) -> Result<String, CrcScreenError>
where
    R: Read,
{
    let locale = args.locale.unwrap_or(settings.locale);
    let intake: ScreeningIntake = serde_json::from_reader(input)?;

    match args.today.or(settings.today) {
        Some(clock) => render(&ScreeningService::new(clock, locale), intake, args.format),
        None => render(&ScreeningService::new(SystemClock, locale), intake, args.format),
    }
}

fn render<C: Clock>(
    service: &ScreeningService<C>,
    intake: ScreeningIntake,
    format: OutputFormat,
) -> Result<String, CrcScreenError> {
    let evaluated = service.evaluate_intake(intake)?;
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&evaluated)?),
        OutputFormat::Text => Ok(report::render_text(&evaluated, service.locale())),
    }
}

/// Evaluate the intake named by `args` (or stdin).
///
/// # Errors
/// Returns an error if the input cannot be read or evaluated.
pub fn run(args: &CliArgs, settings: &Settings) -> Result<String, CrcScreenError> {
    match &args.input {
        Some(path) => {
            tracing::debug!("Reading intake from file");
            let file = std::fs::File::open(path)?;
            run_with(args, settings, std::io::BufReader::new(file))
        }
        None => {
            tracing::debug!("Reading intake from stdin");
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            run_with(args, settings, buf.as_slice())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Field, ScreeningError};
    use crate::ScreeningReport;

    fn args(list: &[&str]) -> Result<CliArgs, CrcScreenError> {
        CliArgs::parse(list.iter().map(|s| (*s).to_string()))
    }

    fn fixed_args(format: OutputFormat) -> CliArgs {
        CliArgs {
            format,
            today: FixedClock::parse("2025-06-01").ok(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["--input", "p.json", "--format", "json", "--lang", "es", "--today", "2025-01-31"])
            .expect("Should parse");
        assert_eq!(parsed.input, Some(PathBuf::from("p.json")));
        assert_eq!(parsed.format, OutputFormat::Json);
        assert_eq!(parsed.locale, Some(Locale::Es));
        assert!(parsed.today.is_some());
        assert!(!parsed.help);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(matches!(args(&["--format"]), Err(CrcScreenError::Usage(_))));
        assert!(matches!(args(&["--format", "xml"]), Err(CrcScreenError::Usage(_))));
        assert!(matches!(args(&["--verbose"]), Err(CrcScreenError::Usage(_))));
        assert!(matches!(args(&["--today", "31/01/2025"]), Err(CrcScreenError::Usage(_))));
        assert!(args(&["-h"]).expect("Should parse").help);
    }

    #[test]
    fn test_run_json_output() {
        let input = r#"{"birth_date": "1965-03-01", "height_cm": 170, "weight_kg": "65"}"#;
        let out = run_with(&fixed_args(OutputFormat::Json), &Settings::default(), input.as_bytes())
            .expect("Should run");

        let report: ScreeningReport = serde_json::from_str(&out).expect("Valid report json");
        assert_eq!(report.age, 60);
        assert_eq!(report.category, Category::AverageRisk);
        assert!(report.bmi_advisory.is_none());
    }

    #[test]
    fn test_run_text_output_uses_settings_locale() {
        let input = r#"{"birth_date": "1990-03-01", "height_cm": "160", "weight_kg": "70"}"#;
        let settings = Settings {
            locale: Locale::Es,
            ..Default::default()
        };
        let out = run_with(&fixed_args(OutputFormat::Text), &settings, input.as_bytes())
            .expect("Should run");

        assert!(out.contains(Category::BelowScreeningAge.label(Locale::Es)));
        assert!(out.contains("IMC"));
    }

    #[test]
    fn test_run_reports_validation_error() {
        let input = r#"{"birth_date": "1990-03-01", "height_cm": "abc", "weight_kg": 70}"#;
        let err = run_with(&fixed_args(OutputFormat::Json), &Settings::default(), input.as_bytes())
            .unwrap_err();
        match err {
            CrcScreenError::Screening(e) => assert_eq!(e.field(), Field::Height),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_incomplete_input() {
        let input = r#"{"height_cm": 170, "weight_kg": 70}"#;
        let err = run_with(&fixed_args(OutputFormat::Json), &Settings::default(), input.as_bytes())
            .unwrap_err();
        assert!(matches!(
            err,
            CrcScreenError::Screening(ScreeningError::IncompleteInput { field: Field::BirthDate })
        ));
    }

    #[test]
    fn test_run_rejects_misspelled_answer() {
        // A flat, misspelled flag must not evaluate as "no symptoms".
        let input = r#"{"birth_date": "1965-03-01", "height_cm": 170, "weight_kg": 65, "symptoms": true, "hereditary": true}"#;
        let err = run_with(&fixed_args(OutputFormat::Json), &Settings::default(), input.as_bytes())
            .unwrap_err();
        assert!(matches!(err, CrcScreenError::Serialization(_)));

        let input = r#"{"birth_date": "1965-03-01", "height_cm": 170, "weight_kg": 65, "risk_factors": {"hereditary_syndrom": true}}"#;
        let err = run_with(&fixed_args(OutputFormat::Json), &Settings::default(), input.as_bytes())
            .unwrap_err();
        assert!(matches!(err, CrcScreenError::Serialization(_)));
    }

    #[test]
    fn test_run_nested_risk_factors() {
        let input = r#"{"birth_date": "1965-03-01", "height_cm": 170, "weight_kg": 65, "risk_factors": {"hereditary_syndrome": true}}"#;
        let out = run_with(&fixed_args(OutputFormat::Json), &Settings::default(), input.as_bytes())
            .expect("Should run");
        let report: ScreeningReport = serde_json::from_str(&out).expect("Valid report json");
        assert_eq!(report.category, Category::LynchSyndrome);
    }

    #[test]
    fn test_run_malformed_json() {
        let err = run_with(&fixed_args(OutputFormat::Json), &Settings::default(), "{".as_bytes())
            .unwrap_err();
        assert!(matches!(err, CrcScreenError::Serialization(_)));
    }
}
