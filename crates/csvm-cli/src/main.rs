mod cli;
mod commands;
mod logging;

use cli::{DumpParams, RunParams, TraceParams, build_cli, color_choice};

fn main() {
    let matches = build_cli().get_matches();
    logging::init(color_choice(&matches).should_colorize());

    if matches.get_flag("dump") {
        let params = DumpParams::from_matches(&matches);
        commands::dump::run(params.into());
    } else if matches.get_flag("trace") {
        let params = TraceParams::from_matches(&matches);
        commands::trace::run(params.into());
    } else {
        let params = RunParams::from_matches(&matches);
        commands::run::run(params.into());
    }
}
