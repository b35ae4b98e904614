#![warn(clippy::all, clippy::pedantic)]

use std::{
    fmt, io,
    path::Path,
    process::{self, ExitCode},
};

use actix::Actor;
use actix_files::Files;
use actix_web::{rt, web, App, HttpServer};
use log::info;
use openssl::ssl::{SslAcceptor, SslAcceptorBuilder, SslFiletype, SslMethod};

use web::Data;

use puissance_quatre_server::server::{actor, not_found, routes, AppArgs, AppConfig};

fn get_config() -> AppConfig {
    let args = match AppArgs::from_env() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let mut cfg = match &args.config {
        Some(path) => match AppConfig::from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    cfg.apply_partial(args.partial_config);

    if args.print_config {
        match toml::to_string_pretty(&cfg) {
            Ok(cfg_contents) => {
                print!("{cfg_contents}");
                std::process::exit(0);
            }
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    }

    cfg
}

fn main() -> ExitCode {
    let cfg = get_config();

    env_logger::init();

    match rt::System::new().block_on(main_actix(cfg)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn ssl_builder(key: &Path, cert: &Path) -> Result<SslAcceptorBuilder, ServerError> {
    let mut builder =
        SslAcceptor::mozilla_intermediate(SslMethod::tls()).map_err(ServerError::OpenSsl)?;
    builder
        .set_private_key_file(key, SslFiletype::PEM)
        .map_err(ServerError::OpenSsl)?;
    builder
        .set_certificate_chain_file(cert)
        .map_err(ServerError::OpenSsl)?;
    Ok(builder)
}

async fn main_actix(cfg: AppConfig) -> Result<(), ServerError> {
    let cfg = Data::new(cfg);

    let session = actor::Session::new(cfg.game.clone()).start();
    let cfg_1 = Data::clone(&cfg);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(Data::new(session.clone()))
            .app_data(Data::clone(&cfg_1))
            .configure(routes)
            .service(Files::new("/static", &cfg_1.serve_from))
            .default_service(web::route().to(not_found))
    });

    let server = match cfg.tls_files() {
        Some((key, cert)) => {
            let builder = ssl_builder(key, cert)?;
            server.bind_openssl((cfg.address, cfg.socket), builder)
        }
        None => server.bind((cfg.address, cfg.socket)),
    }
    .map_err(ServerError::IO)?;

    info!("Puissance 4 Halloween server running on {} 🎃", cfg.public_url());
    server.run().await.map_err(ServerError::IO)
}

#[derive(Debug)]
enum ServerError {
    IO(io::Error),
    OpenSsl(openssl::error::ErrorStack),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IO(e) => write!(f, "io error: {e}"),
            Self::OpenSsl(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ServerError {}
