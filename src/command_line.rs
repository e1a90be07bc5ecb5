use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One command invocation as submitted by the frontend.
///
/// `opts` keys are either flag names (starting with `-`) or bare
/// positional markers; values are `null`/`false` (omit), `true`
/// (boolean switch) or the option's text. Insertion order of the keys
/// is the order the options are rendered in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRequest {
    pub command: String,
    #[serde(default)]
    pub opts: Map<String, Value>,
}

/// Render the request as a single display string: the subcommand
/// followed by its options in insertion order.
///
/// No quoting or escaping is applied; this form is for history records
/// and logs, never for execution (see [`command_argv`]).
pub fn command_string(request: &CommandRequest) -> String {
    let mut line = request.command.clone();
    for token in option_tokens(request) {
        line.push(' ');
        line.push_str(&token);
    }
    line
}

/// Render the request's options as an argv array, one element per
/// token, following the same rules as [`command_string`]. Used with a
/// non-shell subprocess spawn so option values are never interpreted
/// by a shell.
pub fn command_argv(request: &CommandRequest) -> Vec<String> {
    option_tokens(request)
}

fn option_tokens(request: &CommandRequest) -> Vec<String> {
    let mut tokens = Vec::new();
    for (key, value) in &request.opts {
        match value {
            // null and false both mean "option not set"
            Value::Null | Value::Bool(false) => continue,
            // a true value is a bare switch
            Value::Bool(true) => tokens.push(key.clone()),
            other => {
                let rendered = render_value(other);
                if key.starts_with('-') {
                    tokens.push(key.clone());
                    tokens.push(rendered);
                } else {
                    // keys without a dash are positional markers: the
                    // key itself is dropped
                    tokens.push(rendered);
                }
            }
        }
    }
    tokens
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
