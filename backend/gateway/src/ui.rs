//! Page routes: the cookbook page and the form posts behind its buttons.
//!
//! Every form post applies one session action and redirects back to `/`.

use axum::{
    Form, Router,
    extract::State,
    response::{Html, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::{debug, instrument};

use cookbook_core::{IngredientChange, SessionAction};
use cookbook_logging::{EventLogger, SessionEvent};

use crate::page::render_page;
use crate::recipe_flow::ask_for_recipe;
use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
pub struct IngredientField {
    #[serde(default)]
    pub ingredient: Option<String>,
}

/// Routes for the page and its forms.
pub fn ui_router() -> Router<GatewayState> {
    Router::new()
        .route("/", get(index))
        .route("/ingredients", post(add_ingredient))
        .route("/ingredients/remove", post(remove_ingredient))
        .route("/recipe/ask", post(ask))
        .route("/recipe/reset", post(reset))
}

async fn index(State(state): State<GatewayState>) -> Html<String> {
    let session = state.session.lock().await;
    Html(render_page(&state.page, &session))
}

#[instrument(skip_all)]
async fn add_ingredient(
    State(state): State<GatewayState>,
    Form(field): Form<IngredientField>,
) -> Redirect {
    let Some(text) = field.ingredient else {
        return Redirect::to("/");
    };
    let mut session = state.session.lock().await;
    session.apply(SessionAction::Input(text));
    let change = session.apply(SessionAction::SubmitIngredient);
    log_change(&session.id().to_string(), change);
    Redirect::to("/")
}

#[instrument(skip_all)]
async fn remove_ingredient(
    State(state): State<GatewayState>,
    Form(field): Form<IngredientField>,
) -> Redirect {
    if let Some(target) = field.ingredient {
        let mut session = state.session.lock().await;
        let change = session.apply(SessionAction::RemoveIngredient(target));
        log_change(&session.id().to_string(), change);
    }
    Redirect::to("/")
}

#[instrument(skip_all)]
async fn ask(State(state): State<GatewayState>) -> Redirect {
    // The request finishes in the background; the page polls until it does.
    if let Err(e) = ask_for_recipe(&state).await {
        debug!(reason = %e, "Recipe request not sent");
    }
    Redirect::to("/")
}

#[instrument(skip_all)]
async fn reset(State(state): State<GatewayState>) -> Redirect {
    state.session.lock().await.apply(SessionAction::ResetQuery);
    Redirect::to("/")
}

fn log_change(session_id: &str, change: Option<IngredientChange>) {
    let event = match change {
        Some(IngredientChange::Added(ingredient)) => SessionEvent::IngredientAdded { ingredient },
        Some(IngredientChange::Removed(ingredient)) => {
            SessionEvent::IngredientRemoved { ingredient }
        }
        None => {
            debug!("Ingredient edit ignored");
            return;
        }
    };
    EventLogger::log_event(session_id, event);
}
