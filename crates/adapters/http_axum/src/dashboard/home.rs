//! Dashboard home page: one card per relay with on/off/toggle controls.

use askama::Template;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use relayhub_app::ports::GpioAdapter;
use relayhub_domain::pin::PinId;
use relayhub_domain::polarity::Polarity;
use relayhub_domain::relay::{RelayAction, RelayState};

use super::token_suffix;
use crate::auth::TokenQuery;
use crate::state::AppState;

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:2rem;background:#111;color:#eee}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(12rem,1fr));gap:1rem}\
.card{border-radius:.5rem;padding:1rem;background:#222;border-left:.4rem solid #555}\
.card.on{border-left-color:#3c3}.card.off{border-left-color:#c33}\
.label{font-size:1.5rem;font-weight:bold}.badge{font-size:.75rem;color:#fc3}\
form{display:inline}button{margin:.2rem;padding:.4rem .8rem}";

/// A form posting one action for one relay.
pub struct ActionForm {
    action: RelayAction,
    target: String,
}

/// One relay card.
pub struct RelayCard {
    pin: PinId,
    state: RelayState,
    class: &'static str,
    memory_only: bool,
    forms: Vec<ActionForm>,
}

/// Home page template.
#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta http-equiv="refresh" content="{{ refresh_seconds }}">
<title>Relays</title>
<style>{{ style|safe }}</style>
</head>
<body>
<h1>Relays</h1>
<p>{{ cards.len() }} relays, {{ polarity }}</p>
<section class="grid">
{%- for card in cards %}
<article class="card {{ card.class }}" data-pin="{{ card.pin }}">
<h2>GPIO {{ card.pin }}</h2>
<p class="label">{{ card.state }}</p>
{%- if card.memory_only %}
<p class="badge">memory only</p>
{%- endif %}
{%- for form in card.forms %}
<form method="post" action="{{ form.target }}"><button class="btn-{{ form.action }}">{{ form.action }}</button></form>
{%- endfor %}
</article>
{%- endfor %}
</section>
</body>
</html>
"#
)]
pub struct HomeTemplate {
    refresh_seconds: u32,
    style: &'static str,
    polarity: Polarity,
    cards: Vec<RelayCard>,
}

impl HomeTemplate {
    /// Build the page model. Form actions carry `token` as `?token=`.
    #[must_use]
    pub fn new(
        refresh_seconds: u32,
        relays: Vec<(PinId, RelayState)>,
        memory_only: &[PinId],
        polarity: Polarity,
        token: Option<&str>,
    ) -> Self {
        let suffix = token_suffix(token);
        let cards = relays
            .into_iter()
            .map(|(pin, state)| RelayCard {
                pin,
                state,
                class: if state.is_on() { "on" } else { "off" },
                memory_only: memory_only.contains(&pin),
                forms: RelayAction::ALL
                    .into_iter()
                    .map(|action| ActionForm {
                        action,
                        target: format!("/relays/{pin}/{action}{suffix}"),
                    })
                    .collect(),
            })
            .collect();

        Self {
            refresh_seconds,
            style: STYLE,
            polarity,
            cards,
        }
    }
}

impl IntoResponse for HomeTemplate {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to render dashboard");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// `GET /`: relay overview.
pub async fn index<G>(
    State(state): State<AppState<G>>,
    Query(query): Query<TokenQuery>,
) -> HomeTemplate
where
    G: GpioAdapter + 'static,
{
    let service = &state.relay_service;
    HomeTemplate::new(
        5,
        service.list(),
        &service.unavailable_pins(),
        service.polarity(),
        query.token.as_deref(),
    )
}
