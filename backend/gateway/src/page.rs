//! Server-rendered cookbook page.

use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

use cookbook_core::{CookbookSession, PanelState};

use crate::server::PageSettings;

/// Render the whole page for the current session state.
///
/// While a request is in flight the page refreshes itself every second so the
/// answer shows up without user action.
pub fn render_page(page: &PageSettings, session: &CookbookSession) -> String {
    let mut html = String::with_capacity(4096);
    let requesting = session.panel().state() == PanelState::Requesting;

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    if requesting {
        html.push_str("<meta http-equiv=\"refresh\" content=\"1\">\n");
    }
    let _ = writeln!(html, "<title>{}</title>", encode_text(&page.title));
    html.push_str("</head>\n<body>\n<main>\n");

    let _ = writeln!(html, "<div><h1>{}</h1></div>", encode_text(&page.title));
    let _ = writeln!(html, "<p><small>{}</small></p>", encode_text(&page.subtitle));

    render_ingredients(&mut html, session);
    render_recipe_panel(&mut html, session, requesting);

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_ingredients(html: &mut String, session: &CookbookSession) {
    html.push_str("<div>\n");
    for ingredient in session.ingredients().iter() {
        let _ = writeln!(
            html,
            "<div><span>{}</span><form method=\"post\" action=\"/ingredients/remove\" style=\"display:inline\"><input type=\"hidden\" name=\"ingredient\" value=\"{}\"><button type=\"submit\">Remove</button></form></div>",
            encode_text(ingredient),
            encode_double_quoted_attribute(ingredient),
        );
    }
    let _ = writeln!(
        html,
        "<form method=\"post\" action=\"/ingredients\"><input name=\"ingredient\" type=\"text\" placeholder=\"Enter ingredient\" autocomplete=\"off\" value=\"{}\"><button type=\"submit\">Add</button></form>",
        encode_double_quoted_attribute(session.form().buffer()),
    );
    html.push_str("</div>\n");
}

fn render_recipe_panel(html: &mut String, session: &CookbookSession, requesting: bool) {
    html.push_str("<div>\n");
    for message in session.panel().transcript() {
        let _ = writeln!(
            html,
            "<div id=\"msg-{}\" style=\"white-space: pre-wrap\">{}</div>",
            encode_double_quoted_attribute(&message.id),
            encode_text(&message.content),
        );
    }
    if requesting {
        html.push_str("<p><small>Asking the chef...</small></p>\n");
    }
    html.push_str("<form method=\"post\" action=\"/recipe/ask\"><button type=\"submit\">Ask for recipe</button></form>\n");
    html.push_str("<form method=\"post\" action=\"/recipe/reset\"><button type=\"submit\">Reset</button></form>\n");
    html.push_str("</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookbook_core::DEFAULT_SEED_PROMPT;

    #[test]
    fn test_renders_title_and_controls() {
        let session = CookbookSession::new(DEFAULT_SEED_PROMPT);
        let html = render_page(&PageSettings::default(), &session);
        assert!(html.contains("<h1>TechCollEDGE cookbook</h1>"));
        assert!(html.contains("Add ingredients, then click for a recipe."));
        assert!(html.contains("Ask for recipe"));
        assert!(html.contains(">Reset<"));
        assert!(!html.contains("Remove"));
        assert!(!html.contains("http-equiv"));
    }

    #[test]
    fn test_escapes_ingredients() {
        let mut session = CookbookSession::new(DEFAULT_SEED_PROMPT);
        session.add_ingredient("<script>\"chili\"</script>");
        let html = render_page(&PageSettings::default(), &session);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert_eq!(html.matches("Remove").count(), 1);
    }

    #[test]
    fn test_only_assistant_messages_are_shown() {
        let mut session = CookbookSession::new(DEFAULT_SEED_PROMPT);
        session.add_ingredient("flour");
        session.begin_recipe_request().unwrap();
        let html = render_page(&PageSettings::default(), &session);
        assert!(html.contains("http-equiv=\"refresh\""));

        session.complete_recipe_request("Bake it.".into()).unwrap();
        let html = render_page(&PageSettings::default(), &session);
        assert!(html.contains("Bake it."));
        assert!(!html.contains("You are a recipe assistant"));
        assert!(!html.contains("white-space: pre-wrap\">flour<"));
    }
}
