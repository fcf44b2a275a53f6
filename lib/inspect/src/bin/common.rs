use std::str::FromStr;
use std::path::{PathBuf};
use std::io::{self, Write};
use anyhow::Result;
use structopt::StructOpt;
use cvrp_inspect::InstanceReport;

#[derive(Clone, Debug, StructOpt)]
pub struct OutputOptions {
  #[structopt(long="format", short="f", parse(try_from_str), default_value="text", possible_values=&OUTPUT_FORMAT_STRINGS)]
  pub fmt: OutputFormat,
  #[structopt(long="output", short="o")]
  pub file: Option<PathBuf>,
  #[structopt(long)]
  pub log: Option<PathBuf>,
}

pub const OUTPUT_FORMAT_STRINGS: [&str; 3] = ["text", "json", "json-summ"];

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
    JsonSummary,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        return match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json-summ" => Ok(Self::JsonSummary),
            _ => Err(format!("invalid string: {}", s))
        };
    }
}


impl Default for OutputFormat {
  fn default() -> Self { OutputFormat::Text }
}


pub fn write_report(report: &impl InstanceReport, buf: impl io::Write, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Text => report.write_text(buf)?,
        OutputFormat::Json => report.write_json(buf)?,
        OutputFormat::JsonSummary => report.write_json_summary(buf)?,
    };
    Ok(())
}

pub fn output_report(options: &OutputOptions, report: &impl InstanceReport) -> Result<()> {
  match options.file.as_ref() {
      Some(path) => {
        let mut writer = std::io::BufWriter::new(std::fs::File::create(path)?);
        write_report(report, &mut writer, options.fmt)?;
        writer.flush()?;
      }
      None => {
        write_report(report, std::io::stdout(), options.fmt)?;
      }
    }
  Ok(())
}
