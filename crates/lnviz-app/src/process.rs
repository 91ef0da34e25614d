//! Message processing: runs the TEA update loop and dispatches actions

use tracing::trace;

use crate::actions::{handle_action, ActionContext};
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function, following any
/// chained messages and dispatching the resulting actions
pub fn process_message(state: &mut AppState, message: Message, ctx: &mut ActionContext) {
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            trace!("Dispatching {:?}", action);
            handle_action(action, ctx);
        }

        msg = result.message;
    }
}
