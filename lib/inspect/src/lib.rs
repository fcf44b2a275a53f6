use std::path::Path;
use std::io;
use anyhow::Result;
use itertools::Itertools;
use cvrp_instances::CvrpInstance;


mod logging_setup {
    use super::*;
    use tracing_subscriber::{EnvFilter, fmt, registry, prelude::*};
    use tracing_appender::{non_blocking, non_blocking::WorkerGuard};
    use std::fs::OpenOptions;

    fn build_and_set_global_subscriber<P>(logfile: Option<P>, is_test : bool) -> Result<Option<WorkerGuard>> where
        P : AsRef<Path>
    {
        let stderr_log = fmt::layer().with_writer(io::stderr);
        let env_filter = EnvFilter::from_default_env();
        let r = registry().with(stderr_log).with(env_filter);

        let flush_guard = match logfile {
            Some(p) => {
                let logfile = OpenOptions::new()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(p)?;
                let (writer, _guard) = non_blocking::NonBlockingBuilder::default()
                    .lossy(false)
                    .finish(logfile);
                let json = fmt::layer()
                    .json()
                    .with_span_list(true)
                    .with_current_span(false)
                    .with_writer(writer);

                let r = r.with(json);
                if is_test { r.try_init().ok(); }
                else { r.try_init()?; }
                Some(_guard)
            },
            None => {
                if is_test { r.try_init().ok(); }
                else { r.try_init()?; }
                None
            }
        };
        return Ok(flush_guard)
    }

    /// Installs the global subscriber: human readable events on stderr and, if
    /// `logfile` is given, newline delimited JSON in that file. Levels come from
    /// `RUST_LOG`. Keep the returned guard alive until logging is done.
    pub fn init_logging(logfile: Option<impl AsRef<Path>>) -> Result<Option<WorkerGuard>> {
        return build_and_set_global_subscriber(logfile, false);
    }

    /// Like [`init_logging`], but a subscriber installed by an earlier test is not an error.
    pub fn init_test_logging(logfile: Option<impl AsRef<Path>>) -> Result<Option<WorkerGuard>> {
        return build_and_set_global_subscriber(logfile, true);
    }
}
pub use logging_setup::*;


fn node_record(instance: &CvrpInstance, idx: usize) -> json::JsonValue {
    let node = &instance.nodes()[idx];
    json::object! {
        index: idx,
        x: node.location.x,
        y: node.location.y,
        demand: node.demand,
    }
}

/// Ways of printing a parsed instance.
pub trait InstanceReport {
    fn write_text(&self, buf : impl io::Write) -> Result<()>;
    fn write_json(&self, buf : impl io::Write) -> Result<()>;
    fn write_json_summary(&self, buf : impl io::Write) -> Result<()>;
}

impl InstanceReport for CvrpInstance {
    fn write_text(&self, mut buf : impl io::Write) -> Result<()> {
        write!(buf, "{}", self)?;
        return Ok(())
    }

    fn write_json(&self, mut buf : impl io::Write) -> Result<()> {
        let nodes: json::JsonValue = (0..self.dimension())
            .map(|i| node_record(self, i))
            .collect_vec()
            .into();
        let root = json::object! {
            capacity: self.capacity(),
            depot: self.depot_id(),
            dimension: self.dimension(),
            initial_permutation: self.initial_permutation().to_vec(),
            nodes: nodes,
        };
        root.write_pretty(&mut buf, 2)?;
        return Ok(())
    }

    fn write_json_summary(&self, mut buf : impl io::Write) -> Result<()> {
        let root = json::object! {
            capacity: self.capacity(),
            depot: self.depot_id(),
            dimension: self.dimension(),
            number_of_clients: self.number_of_clients(),
            total_demand: self.total_demand(),
        };
        root.write_pretty(&mut buf, 2)?;
        return Ok(())
    }
}
