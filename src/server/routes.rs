use actix::{Addr, MailboxError};
use actix_web::{
    error::{ErrorBadRequest, ErrorServiceUnavailable},
    http::header::{self, ContentType},
    rt, web, HttpResponse,
};
use log::{debug, error};
use qstring::QString;

use web::Data;

use crate::game_config::{GameMode, PartialGameConfig};
use crate::server::{
    actor::{
        self,
        session::{GetSnapshot, Reset, Start, SubmitMove},
    },
    render, AppConfig,
};

/// Form field holding the 0-based column of a move.
const COLUMN_PARAMETER: &str = "column";
/// Form field selecting the game mode on reset.
const MODE_PARAMETER: &str = "mode";

type SessionAddr = Data<Addr<actor::Session>>;

/// Registers every game route. Expects `Data<AppConfig>` and
/// `Data<Addr<actor::Session>>` in the app data.
pub fn routes(cfg: &mut web::ServiceConfig) {
    // Resources answer 405 to other methods instead of falling through to 404.
    cfg.service(web::resource("/").route(web::get().to(board)))
        .service(web::resource("/state").route(web::get().to(state)))
        .service(web::resource("/play").route(web::post().to(play)))
        .service(web::resource("/start").route(web::post().to(start)))
        .service(web::resource("/reset").route(web::post().to(reset)));
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().body("404 Not Found")
}

fn mailbox_error(e: MailboxError) -> actix_web::Error {
    error!("Session unreachable: {e}");
    ErrorServiceUnavailable(e)
}

fn see_board() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

async fn board(session: SessionAddr) -> Result<HttpResponse, actix_web::Error> {
    let snapshot = session.send(GetSnapshot).await.map_err(mailbox_error)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(render::page(&snapshot)))
}

async fn state(session: SessionAddr) -> Result<HttpResponse, actix_web::Error> {
    let snapshot = session.send(GetSnapshot).await.map_err(mailbox_error)?;
    Ok(HttpResponse::Ok().json(&snapshot))
}

async fn play(
    body: String,
    cfg: Data<AppConfig>,
    session: SessionAddr,
) -> Result<HttpResponse, actix_web::Error> {
    let qs = QString::from(body.as_str());
    let Some(Ok(col)) = qs.get(COLUMN_PARAMETER).map(str::parse::<isize>) else {
        debug!("Rejected move form: {body:?}");
        return Err(ErrorBadRequest("Colonne invalide"));
    };

    // Negative columns go through the session like any other out of range column.
    let col = usize::try_from(col).unwrap_or(usize::MAX);
    let report = session
        .send(SubmitMove { col })
        .await
        .map_err(mailbox_error)?;

    if report.robot_played() && !cfg.robot_delay.is_zero() {
        rt::time::sleep(cfg.robot_delay).await;
    }

    Ok(see_board())
}

async fn start(session: SessionAddr) -> Result<HttpResponse, actix_web::Error> {
    session.send(Start).await.map_err(mailbox_error)?;
    Ok(see_board())
}

async fn reset(body: String, session: SessionAddr) -> Result<HttpResponse, actix_web::Error> {
    let qs = QString::from(body.as_str());
    let mode = match qs.get(MODE_PARAMETER).map(str::parse::<GameMode>) {
        Some(Ok(mode)) => Some(mode),
        Some(Err(e)) => return Err(ErrorBadRequest(e.to_string())),
        None => None,
    };

    let partial = PartialGameConfig {
        mode,
        ..PartialGameConfig::default()
    };
    session.send(Reset(partial)).await.map_err(mailbox_error)?;
    Ok(see_board())
}
