use annals::blog::Blog;
use annals::build::build_archives;
use annals::config::Config;
use anyhow::{anyhow, Result};
use clap::{App, AppSettings, Arg, SubCommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let matches = App::new("annals")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A small weblog engine with year-based archive pages")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("directory")
                .short("c")
                .long("directory")
                .takes_value(true)
                .help("Where to start looking for annals.yaml (default: the current directory)"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log more; repeat for even more"),
        )
        .subcommand(
            SubCommand::with_name("render")
                .about("Renders the page for a request path to stdout")
                .arg(Arg::with_name("PATH").required(true).index(1)),
        )
        .subcommand(SubCommand::with_name("links").about("Prints the year archive links"))
        .subcommand(
            SubCommand::with_name("build")
                .about("Writes the front page and every year archive page")
                .arg(Arg::with_name("OUTPUT").required(true).index(1)),
        )
        .get_matches();

    let level = match matches.occurrences_of("verbose") {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let directory = match matches.value_of("directory") {
        Some(directory) => PathBuf::from(directory),
        None => std::env::current_dir()?,
    };
    let config = Config::from_directory(&directory)?;
    log::debug!("Serving entries from '{}'", config.datadir.display());
    let blog = Blog::new(config);

    match matches.subcommand() {
        ("render", Some(sub)) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            blog.handle(sub.value_of("PATH").unwrap_or("/"), &mut out)?;
            out.flush()?;
        }
        ("links", _) => println!("{}", blog.archive_index()?.render()),
        ("build", Some(sub)) => {
            let output = Path::new(sub.value_of("OUTPUT").unwrap_or("public"));
            build_archives(&blog, output)?;
        }
        (name, _) => return Err(anyhow!("Unknown subcommand `{}`", name)),
    }
    Ok(())
}
