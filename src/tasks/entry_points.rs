/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;
use crate::config::{Settings, YamlRead};
use crate::demo::run_demo;
use crate::logging::GlobalLogger;

use std::ffi::OsStr;
use std::fs::File;

fn wrap_result_main<F>(main: F)
where F: FnOnce() -> FailResult<()>,
{
    main().unwrap_or_else(|e| {
        for cause in e.iter_chain() {
            error!("{}", cause);
        }

        if std::env::var_os("RUST_BACKTRACE") == Some(OsStr::new("1").to_owned()) {
            error!("{}", e.backtrace());
        }
        std::process::exit(1);
    });
}

fn app<'a, 'b>() -> clap::App<'a, 'b> {
    use clap::Arg;

    clap::App::new("lazymat-demo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Walks through lazily-evaluated matrix arithmetic.")
        .args(&[
            Arg::with_name("config")
                .short("c").long("config")
                .value_name("CONFIG")
                .takes_value(true)
                .help("settings file (YAML); every setting has a default"),
            Arg::with_name("log")
                .long("log")
                .value_name("LOGFILE")
                .takes_value(true)
                .help("also write the log to this file"),
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("log more (may be given twice)"),
            Arg::with_name("no_benchmark")
                .long("no-benchmark")
                .help("skip the lazy evaluation benchmark"),
        ])
}

pub fn lazymat_demo() {
    wrap_result_main(|| {
        let matches = app().get_matches();

        let mut logger = GlobalLogger::default();
        logger.verbosity(matches.occurrences_of("verbose") as i32);
        if let Some(path) = matches.value_of("log") {
            logger.path(path);
        }
        logger.apply()?;

        let mut settings = match matches.value_of("config") {
            Some(path) => {
                info!("reading settings from {}", path);
                Settings::from_reader(File::open(path)?)?
            },
            None => Settings::default(),
        };
        if matches.is_present("no_benchmark") {
            settings.benchmark.enabled = false;
        }
        debug!("{:?}", settings);

        let stdout = std::io::stdout();
        run_demo(&settings, &mut stdout.lock())
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line() {
        let m = app().get_matches_from(vec!["lazymat-demo", "-vv", "--no-benchmark", "--config", "x.yaml"]);
        assert_eq!(m.occurrences_of("verbose"), 2);
        assert!(m.is_present("no_benchmark"));
        assert_eq!(m.value_of("config"), Some("x.yaml"));
        assert_eq!(m.value_of("log"), None);
    }
}
