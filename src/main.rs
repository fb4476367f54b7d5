use std::fmt::Display;
use std::process;
use std::str::FromStr;

use clap::{App, Arg, ArgMatches};
use console::{Emoji, Term};
use log::{error, LevelFilter};
use reqwest::Url;
use simplelog::{ConfigBuilder, TerminalMode};

use swapi_client::swapi::client::connector::{SwapiClient, SwapiConnector, DEFAULT_BASE_URL};
use swapi_client::swapi::json::film::Film;
use swapi_client::swapi::json::people::Person;
use swapi_client::swapi::model::Model;
use swapi_client::swapi::resource::Resource;
use swapi_client::SwapiError;

#[path = "metadata.rs"]
mod swapi_metadata;

// CLI params ---
const RESOURCE_PARAM: &str = "resource";
const ID_PARAM: &str = "id";
const BASE_URL_PARAM: &str = "base-url";
const LOG_LEVEL_PARAM: &str = "log-level";

// CLI flags ---
const COUNT_ONLY_FLAG: &str = "count-only";
const SILENT_MODE_FLAG: &str = "silent-mode";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // initialize CLI access ---
    let args = setup_cli();

    // determine if console is user attended or not (ie: output is being piped into a file) ---
    let console_is_user_attended = console::user_attended();

    // parse obligatory params ---

    // since the clap crate is in charge of making sure these obligatory params are fulfilled as
    // requirements, any of these unwrap(s) ending in error should be theoretically impossible under
    // normal circumstances. still, it doesn't hurt to do a quick validation, just in case

    let resource_arg = args.value_of(RESOURCE_PARAM).unwrap_or_else(|| {
        eprintln!("{} is an obligatory param! Aborting operation.", RESOURCE_PARAM);
        process::exit(1)
    });

    let resource = Resource::from_str(resource_arg).unwrap_or_else(|_| {
        // clap's possible_values should have rejected anything else already
        eprintln!("[{}] is not a known SWAPI resource! Aborting operation.", resource_arg);
        process::exit(1)
    });

    // parse optional params & flags ---
    let silent_mode: bool = !console_is_user_attended || args.is_present(SILENT_MODE_FLAG);

    let count_only: bool = args.is_present(COUNT_ONLY_FLAG);

    let selected_id: Result<u64, _> = args.value_of_t(ID_PARAM);

    let base_url: Url = args
        .value_of(BASE_URL_PARAM)
        .map(|raw| {
            Url::parse(raw).unwrap_or_else(|e| {
                eprintln!("[{}] is not a valid base URL ({})! Aborting operation.", raw, e);
                process::exit(1)
            })
        })
        .unwrap_or_else(|| Url::parse(DEFAULT_BASE_URL).unwrap());

    // initialize logging facade ---
    let log_level = if !silent_mode {
        // if console _is_ attended, honor selected log-level
        args.value_of_t_or_exit(LOG_LEVEL_PARAM)
    } else {
        // automatically turn off all logs if console is unattended
        // (specially useful for piping results to a file without the extra 'noise')
        LevelFilter::Off
    };

    init_logging(log_level);

    // initialize SWAPI client ---
    let client = SwapiClient::with_base_url(base_url.clone());

    // initialize app ---
    let stdout: Option<Term> = if !silent_mode {
        Some(Term::stdout())
    } else {
        None
    };

    if let Some(stdout) = &stdout {
        stdout.write_line(get_logo())?;

        let planet_emoji = Emoji("🪐", "*");
        let looking_glass_emoji = Emoji("🔍", "*");

        stdout.write_line(&format!("{} Talking to SWAPI at [{}].", planet_emoji, base_url))?;

        if let Ok(id) = selected_id {
            stdout.write_line(&format!(
                "{} Fetching [{}] entity with id [{}].",
                looking_glass_emoji, resource, id
            ))?;
        } else {
            stdout.write_line(&format!(
                "{} Listing the full [{}] collection.",
                looking_glass_emoji, resource
            ))?;
        }

        stdout.write_line(&"=".repeat(stdout.size().1 as usize))?; // print separator for whole length of stdout
    }

    // execute the request(s) for the selected target(s) ---
    let result_out = Term::stdout(); // result always ignores 'silent' flag

    let outcome = match resource {
        Resource::People => run::<Person>(&client, selected_id.ok(), count_only, &result_out),
        Resource::Films => run::<Film>(&client, selected_id.ok(), count_only, &result_out),
    };

    outcome.unwrap_or_else(|e| {
        error!("{}", e);
        // misspelled ids and flaky networks are expected scenarios; exit gracefully, but with an error
        process::exit(1)
    });

    Ok(())
}

/// Fetches and prints the selected target: a single entity when `id` is supplied, the whole
/// (lazily-paginated) collection otherwise.
fn run<M: Model + Display>(
    client: &dyn SwapiConnector, id: Option<u64>, count_only: bool, out: &Term,
) -> Result<(), SwapiError> {
    if let Some(id) = id {
        let entity = M::get(client, id)?;
        write_result_line(out, &entity.to_string());
        return Ok(());
    }

    let mut queryset = M::all(client);

    let total = queryset.total_count()?;
    write_result_line(out, &format!("{} entities in the [{}] collection.", total, M::RESOURCE));

    if count_only {
        return Ok(());
    }

    for entity in queryset {
        write_result_line(out, &entity?.to_string());
    }

    Ok(())
}

/// Prints a result line into target [`Term`].
fn write_result_line(term: &Term, line: &str) {
    term.write_line(line).unwrap_or_else(|e| {
        error!("An error has occurred while printing results to term! Error = {}", e);
    });
}

/// Retrieves the application's ASCII-art logo.
fn get_logo() -> &'static str {
    r#"
         .M"""bgd `7MMF'     A     `7MF' db      `7MM"""Mq.`7MMF'
        ,MI    "Y   `MA     ,MA     ,V  ;MM:       MM   `MM. MM
        `MMb.        VM:   ,VVM:   ,V  ,V^MM.      MM   ,M9  MM
          `YMMNq.     MM.  M' MM.  M' ,M  `MM      MMmmdM9   MM
        .     `MM     `MM A'  `MM A'  AbmmmqMA     MM        MM
        Mb     dM      :MM;    :MM;  A'     VML    MM        MM
        P"Ybmmd"        VF      VF .AMA.   .AMMA..JMML.    .JMML.
        --------- These aren't the droids you're looking for ---------
    "#
}

/// Initializes the `Log` crate's logging facade.
fn init_logging(log_level: LevelFilter) {
    simplelog::TermLogger::init(
        log_level,
        ConfigBuilder::new()
            // log targets use the library's module path, hence the underscored package name
            .add_filter_allow(swapi_metadata::package_name().replace('-', "_"))
            .set_time_to_local(true)
            .build(),
        TerminalMode::Mixed,
    )
    .unwrap() // we want to panic if the logger couldn't be initialized, so the unwrap() is adequate
}

/// Sets up the CLI for the whole application.
fn setup_cli() -> ArgMatches {
    return App::new(swapi_metadata::package_name())
        .version(swapi_metadata::full_version())
        .author(swapi_metadata::authors())
        .about(swapi_metadata::description())
        // params start here ---
        .arg(
            Arg::new(RESOURCE_PARAM)
                .long(RESOURCE_PARAM)
                .short('r')
                .about("The SWAPI resource type to fetch")
                .required(true)
                .takes_value(true)
                .possible_values(&["people", "films"])
                .case_insensitive(false),
        )
        .arg(
            Arg::new(ID_PARAM)
                .long(ID_PARAM)
                .short('i')
                .about(
                    "A specific entity id to be selected as target (instead of listing the whole \
                    collection)",
                )
                .required(false)
                .takes_value(true)
                .validator(|value| {
                    let value = value.parse::<u64>();

                    if value.is_err() {
                        return Err("Supplied value must be an integer number");
                    }

                    Ok(())
                })
                .conflicts_with(COUNT_ONLY_FLAG), // user must either select one entity or count the collection; not both
        )
        .arg(
            Arg::new(BASE_URL_PARAM)
                .long(BASE_URL_PARAM)
                .short('b')
                .about("Overrides SWAPI's public base URL (ie: to point at a local fixture server)")
                .required(false)
                .takes_value(true),
        )
        .arg(
            Arg::new(LOG_LEVEL_PARAM)
                .long(LOG_LEVEL_PARAM)
                .short('L')
                .about("Overrides the logging verbosity for the whole application")
                .required(false)
                .takes_value(true) // redundant by specifying 'possible_values'; declared here just to keep homogeneous build structure
                .possible_values(&[
                    LevelFilter::Info.as_str(),
                    LevelFilter::Debug.as_str(),
                    LevelFilter::Trace.as_str(),
                    LevelFilter::Warn.as_str(),
                    LevelFilter::Error.as_str(),
                    LevelFilter::Off.as_str(),
                ])
                .case_insensitive(true)
                .default_value(swapi_metadata::default_log_level().as_str())
                .conflicts_with(SILENT_MODE_FLAG),
        )
        // optional flags start here ---
        .arg(
            Arg::new(COUNT_ONLY_FLAG)
                .long(COUNT_ONLY_FLAG)
                .short('c')
                .about(
                    "Prints only the API-reported total count of the selected collection, without \
                    listing its entities (this still costs exactly one page request)",
                )
                .takes_value(false),
        )
        .arg(
            Arg::new(SILENT_MODE_FLAG)
                .long(SILENT_MODE_FLAG)
                .short('s')
                .about(
                    "Marks the operation as silent, which turns off all logging and printing to stdout, \
                    with the sole exception of the fetched results. This makes it useful for piping \
                    just the results, without the added 'noise'. (NOTE: piping is automatically detected, \
                    which activates silent-mode without having to explicitly add the flag to the command)",
                )
                .takes_value(false),
        )
        .get_matches();
}
