//! End-to-end scenarios: tokenise, resolve, aggregate.

use std::collections::HashMap;

use anyhow::{Result, anyhow, ensure};
use flagwise::{Flag, FlagError, FlagSet, Validity, is_display_request};
use futures::executor::block_on;
use rstest::{fixture, rstest};

type Env = HashMap<String, String>;

#[fixture]
fn empty_env() -> Env {
    Env::new()
}

#[fixture]
fn service_flags() -> FlagSet {
    FlagSet::new()
        .with(Flag::string("host").alias("H").env("SERVICE_HOST"))
        .with(
            Flag::number("port")
                .alias("p")
                .env("SERVICE_PORT")
                .default_value(8080)
                .validator(|port: f64| async move {
                    if (1.0..=65535.0).contains(&port) {
                        Validity::Valid
                    } else {
                        Validity::invalid(format!("port {port} is out of range"))
                    }
                }),
        )
        .with(Flag::boolean("tls").alias("tls-enabled").default_value(false))
}

fn run(flags: &FlagSet, argv: &[&str], env: &Env) -> Result<flagwise::Configuration> {
    let args = flags
        .tokenize(argv.iter().copied())
        .map_err(|err| anyhow!("tokenise: {err}"))?;
    block_on(flags.compile_with_env(&args, env)).map_err(|err| anyhow!("{err}"))
}

#[rstest]
fn resolves_complete_configuration(service_flags: FlagSet, empty_env: Env) -> Result<()> {
    let config = run(&service_flags, &["-H", "db", "--tls-enabled"], &empty_env)?;
    ensure!(config.get_str("host") == Some("db"), "host: {config:?}");
    ensure!(config.get_number("port") == Some(8080.0), "port: {config:?}");
    ensure!(config.get_bool("tls") == Some(true), "tls: {config:?}");
    Ok(())
}

#[rstest]
fn environment_fills_gaps(service_flags: FlagSet) -> Result<()> {
    let env = Env::from([
        (String::from("SERVICE_HOST"), String::from("cache")),
        (String::from("SERVICE_PORT"), String::from("6379")),
    ]);
    let config = run(&service_flags, &["--tls", "0"], &env)?;
    ensure!(config.get_str("host") == Some("cache"), "host: {config:?}");
    ensure!(config.get_number("port") == Some(6379.0), "port: {config:?}");
    ensure!(config.get_bool("tls") == Some(false), "tls: {config:?}");
    Ok(())
}

#[rstest]
fn every_failure_is_listed(service_flags: FlagSet, empty_env: Env) -> Result<()> {
    let args = service_flags
        .tokenize(["--port", "70000", "--tls", "maybe"])
        .map_err(|err| anyhow!("tokenise: {err}"))?;
    let Err(err) = block_on(service_flags.compile_with_env(&args, &empty_env)) else {
        return Err(anyhow!("expected failure"));
    };
    let FlagError::Aggregate(agg) = &*err else {
        return Err(anyhow!("expected Aggregate, got {err:?}"));
    };
    let names: Vec<_> = agg.flag_names().collect();
    ensure!(names == ["host", "port", "tls"], "names: {names:?}");
    let message = err.to_string();
    ensure!(
        message.split(", ").count() == 3,
        "three comma-joined entries expected: {message}"
    );
    ensure!(message.contains("port 70000 is out of range"), "{message}");
    Ok(())
}

#[rstest]
fn unknown_arguments_are_rejected(service_flags: FlagSet) {
    let err = service_flags
        .tokenize(["--colour", "blue"])
        .expect_err("unknown flag");
    assert!(matches!(*err, FlagError::CliParsing(_)));
    assert!(!is_display_request(&err));
}
