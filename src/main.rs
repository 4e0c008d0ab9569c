use std::{env, io, process};

use hello_shell::config::ConfigLoader;
use hello_shell::executor::{NixSys, SearchPath};
use hello_shell::io::RawStdin;
use hello_shell::repl::Shell;
use hello_shell::session::Session;
use hello_shell::{flags, logging};
use log::{info, warn};

fn main() {
    let args: Vec<String> = env::args().collect();
    let flags = flags::consume_flags("hello", &args, true);

    let config = match ConfigLoader::load_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("hello: config: {}", e);
            ConfigLoader::default_config()
        }
    };
    logging::init(logging::level_from_env(config.log_level_filter()));

    if flags.next < args.len() {
        eprintln!("hello: unexpected arguments");
        warn!("ignoring {:?}", &args[flags.next..]);
    }

    let session = Session::new(SearchPath::new(&config.search_path), flags.json);
    info!("starting with search path {}", session.search_path);
    let mut shell = Shell::new(NixSys, session, &config);

    if let Err(e) = shell.run(&mut RawStdin, &mut io::stdout(), &mut io::stderr()) {
        eprintln!("hello: {}", e);
        process::exit(1);
    }
}
