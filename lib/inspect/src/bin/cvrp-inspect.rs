use std::path::PathBuf;
use anyhow::{Context, Result};
use tracing::*;

use cvrp_inspect::*;
use cvrp_instances::CvrpInstance;
use cvrp_instances::dataset::{Dataset, DynLayout, IdxNameMap, StdLayout, cvrp::CvrpLib};

mod common;
use common::*;

use structopt::StructOpt;


#[derive(Debug, StructOpt)]
#[structopt(about = "Reads a CVRP instance file and prints what was parsed")]
struct ClArgs {
    /// Instance file. Not needed with `--dataset`.
    #[structopt(parse(from_os_str), required_unless="dataset")]
    path: Option<PathBuf>,
    /// Dataset directory, relative to DATA_ROOT unless absolute.
    #[structopt(long, short="d", parse(from_os_str), requires="index")]
    dataset: Option<PathBuf>,
    /// Index of the instance within the dataset.
    #[structopt(long, short="i")]
    index: Option<usize>,
    /// Instance file suffix (with an INDEX.txt) or glob pattern (without one).
    #[structopt(long, default_value="vrp")]
    suffix: String,
    #[structopt(flatten)]
    output: OutputOptions,
}


fn load_from_dataset(dir: PathBuf, idx: usize, suffix: &str) -> Result<CvrpInstance> {
    let dir = if dir.is_absolute() { dir } else { cvrp_instances::dataset::data_root()?.join(dir) };
    if dir.join("INDEX.txt").exists() {
        let dset: StdLayout<CvrpLib> = StdLayout::at(&dir, suffix)?;
        info!(name = %dset.index_to_name(idx)?, idx, "loading from dataset");
        dset.load_instance(idx)
    } else {
        let dset: DynLayout<CvrpLib> = DynLayout::at(&dir, &format!("*.{}", suffix))?;
        info!(name = %dset.index_to_name(idx)?, idx, "loading from dataset");
        dset.load_instance(idx)
    }
}

fn load(args: &ClArgs) -> Result<CvrpInstance> {
    match (&args.dataset, args.index, &args.path) {
        (Some(dir), Some(idx), _) => load_from_dataset(dir.clone(), idx, &args.suffix),
        (_, _, Some(path)) => {
            let data = cvrp_instances::read_instance(path).context(format!("failed to load {:?}", path))?;
            Ok(data)
        },
        _ => anyhow::bail!("either a path or --dataset with --index is required"),
    }
}


fn main() -> anyhow::Result<()> {
    let args : ClArgs = StructOpt::from_args();
    let _g = init_logging(args.output.log.clone())?;
    debug!(?args);
    let data = load(&args)?;
    info!(dimension = data.dimension(), capacity = data.capacity(), "instance loaded");
    output_report(&args.output, &data)?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SMALL: &str = "DIMENSION : 2\nCAPACITY : 10\nNODE_COORD_SECTION\n1 0 0\n2 3 4\n\
                         DEMAND_SECTION\n1 0\n2 5\nDEPOT_SECTION\n1\n-1\nEOF\n";

    #[test]
    fn parses_path_argument() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("small.vrp");
        fs::write(&path, SMALL)?;
        let args = ClArgs::from_iter_safe(&["cvrp-inspect", path.to_str().unwrap(), "-f", "json-summ"])?;
        assert_eq!(args.output.fmt, OutputFormat::JsonSummary);
        assert_eq!(load(&args)?.dimension(), 2);
        Ok(())
    }

    #[test]
    fn loads_from_glob_dataset() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("small.vrp"), SMALL)?;
        let dataset = dir.path().to_str().unwrap();
        let args = ClArgs::from_iter_safe(&["cvrp-inspect", "--dataset", dataset, "--index", "0"])?;
        assert_eq!(load(&args)?.capacity(), 10);
        Ok(())
    }

    #[test]
    fn load_errors_keep_the_cause() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("empty.vrp");
        fs::write(&path, "")?;
        let args = ClArgs::from_iter_safe(&["cvrp-inspect", path.to_str().unwrap()])?;
        let err = load(&args).unwrap_err();
        let cause = err.downcast_ref::<cvrp_instances::Error>().unwrap();
        assert_eq!(cause.file_kind(), Some(cvrp_instances::FileErrorKind::Empty));
        Ok(())
    }

    #[test]
    fn writes_report_to_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("small.vrp");
        let output = dir.path().join("small.json");
        fs::write(&input, SMALL)?;
        let args = ClArgs::from_iter_safe(&[
            "cvrp-inspect", input.to_str().unwrap(), "--format", "json", "-o", output.to_str().unwrap(),
        ])?;
        output_report(&args.output, &load(&args)?)?;
        let written = json::parse(&fs::read_to_string(&output)?)?;
        assert_eq!(written["nodes"][1]["y"].as_f64(), Some(4.0));
        Ok(())
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(ClArgs::from_iter_safe(&["cvrp-inspect", "a.vrp", "-f", "xml"]).is_err());
        assert!(ClArgs::from_iter_safe(&["cvrp-inspect"]).is_err());
    }
}
