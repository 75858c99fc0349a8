//! Yes/no question widget and its shared activation script.

use std::borrow::Cow;

use super::QuestionId;
use crate::util::{escape_html, js_string_literal};

/// Attribute marking the activation script element.
pub(crate) const SCRIPT_MARKER: &str = "data-pollmark-activation";

/// Render the static widget markup for one question.
///
/// `document_id` must already be validated; it is embedded verbatim.
pub(crate) fn render_widget(
    document_id: &str,
    id: QuestionId,
    label: &str,
    escape_label: bool,
) -> String {
    let label = if escape_label {
        Cow::Owned(escape_html(label))
    } else {
        Cow::Borrowed(label)
    };

    format!(
        concat!(
            "<div class=\"yesno-question-component\" data-testid=\"yesno-question-{id}\" ",
            "data-document-id=\"{doc}\" data-question-id=\"{id}\">\n",
            "<p class=\"yesno-question-label\">{label}</p>\n",
            "<div class=\"yesno-question-buttons\">\n",
            "<button type=\"button\" class=\"yesno-button-yes\" data-response=\"yes\" data-testid=\"button-yes-{id}\">Yes</button>\n",
            "<button type=\"button\" class=\"yesno-button-no\" data-response=\"no\" data-testid=\"button-no-{id}\">No</button>\n",
            "</div>\n",
            "<div class=\"yesno-question-count\">",
            "<span id=\"response-count-{id}\" data-testid=\"response-count-{id}\">Loading responses...</span>",
            "</div>\n",
            "</div>",
        ),
        id = id,
        doc = document_id,
        label = label,
    )
}

const ACTIVATION_JS: &str = r##"(function () {
  var apiBase = __API_BASE__;
  var sessionKey = "pollmarkSessionId";

  function sessionId() {
    var id = null;
    try { id = window.localStorage.getItem(sessionKey); } catch (e) {}
    if (!id) {
      id = window.crypto && window.crypto.randomUUID
        ? window.crypto.randomUUID()
        : Date.now().toString(16) + Math.random().toString(16).slice(2);
      try { window.localStorage.setItem(sessionKey, id); } catch (e) {}
    }
    return id;
  }

  function fetchTotal(documentId, questionId) {
    var url = apiBase + "/responses/" + encodeURIComponent(documentId) + "/" +
      encodeURIComponent(questionId) + "/counts";
    return fetch(url)
      .then(function (res) {
        if (!res.ok) { throw new Error("HTTP " + res.status); }
        return res.json();
      })
      .then(function (data) { return (data.yes || 0) + (data.no || 0); });
  }

  function setDisabled(buttons, disabled) {
    for (var i = 0; i < buttons.length; i++) { buttons[i].disabled = disabled; }
  }

  function activate(widget) {
    if (widget.getAttribute("data-activated") === "true") { return; }
    widget.setAttribute("data-activated", "true");

    var documentId = widget.getAttribute("data-document-id");
    var questionId = widget.getAttribute("data-question-id");
    var counter = widget.querySelector("[data-testid=\"response-count-" + questionId + "\"]");
    var buttons = widget.querySelectorAll("button[data-response]");

    fetchTotal(documentId, questionId)
      .then(function (total) { if (counter) { counter.textContent = total + " responses so far"; } })
      .catch(function () { if (counter) { counter.textContent = "0 responses so far"; } });

    for (var i = 0; i < buttons.length; i++) {
      buttons[i].addEventListener("click", function (event) {
        var response = event.currentTarget.getAttribute("data-response");
        setDisabled(buttons, true);
        fetch(apiBase + "/responses", {
          method: "POST",
          headers: { "Content-Type": "application/json" },
          body: JSON.stringify({
            documentId: documentId,
            questionId: questionId,
            response: response,
            sessionId: sessionId()
          })
        })
          .then(function (res) {
            if (!res.ok) { throw new Error("HTTP " + res.status); }
            return fetchTotal(documentId, questionId);
          })
          .then(function (total) {
            if (counter) {
              counter.textContent = total + " responses so far · You answered: " + response;
            }
          })
          .catch(function (err) {
            setDisabled(buttons, false);
            console.error("Failed to record response:", err);
          });
      });
    }
  }

  window.pollmarkActivate = function (root) {
    var widgets = (root || document).querySelectorAll(".yesno-question-component");
    for (var i = 0; i < widgets.length; i++) { activate(widgets[i]); }
  };

  if (document.readyState === "loading") {
    document.addEventListener("DOMContentLoaded", function () { window.pollmarkActivate(document); });
  } else {
    window.pollmarkActivate(document);
  }
})();"##;

/// Build the shared activation script for all widgets on a page.
///
/// The script fetches response tallies from `{api_base}/responses/...`,
/// posts clicks to `{api_base}/responses` and exposes
/// `window.pollmarkActivate(root)` for hosts that insert rendered HTML
/// after page load. Activating a widget twice is a no-op.
///
/// # Example
///
/// ```
/// use pollmark_renderer::activation_script;
///
/// let script = activation_script("/api");
/// assert!(script.starts_with("<script data-pollmark-activation>"));
/// assert!(script.contains(r#"var apiBase = "/api";"#));
/// ```
#[must_use]
pub fn activation_script(api_base: &str) -> String {
    let api_base = api_base.trim_end_matches('/');
    let js = ACTIVATION_JS.replacen("__API_BASE__", &js_string_literal(api_base), 1);
    format!("<script {SCRIPT_MARKER}>\n{js}\n</script>")
}
