//! Greeting, main menu and the choices that leave it.

use crate::bot::handlers::{purchase, repair, sell, HandlerCtx};
use crate::bot::messages;
use crate::bot::state::{ConversationState, StateTag};
use crate::core::error::AppResult;

/// Greet a first-time chat and seed its record at the main menu.
pub async fn greet_and_ask_options(ctx: &HandlerCtx<'_>) -> ConversationState {
    ctx.send(messages::GREETING).await;
    ctx.send(messages::MENU_OPTIONS).await;
    ConversationState::new(ctx.now)
}

/// Main menu choice: 1 buy, 2 repair, 3 sell, 4 agent, 5 exit.
pub async fn handle_option(ctx: &HandlerCtx<'_>, convo: &mut ConversationState, message: &str) -> AppResult<()> {
    match message {
        "1" => purchase::ask_model_name(ctx, convo).await,
        "2" => repair::ask_tech_options(ctx, convo).await,
        "3" => sell::ask_model(ctx, convo).await,
        "4" => handle_talk_to_agent(ctx, convo).await,
        "5" => send_farewell(ctx, convo).await,
        _ => {
            ctx.send(messages::INVALID_MENU_OPTION).await;
            Ok(())
        }
    }
}

/// Hand the conversation to a human: absorbing state, sweep-paused.
pub async fn handle_talk_to_agent(ctx: &HandlerCtx<'_>, convo: &mut ConversationState) -> AppResult<()> {
    ctx.send(messages::AGENT_SOON).await;
    convo.pause(StateTag::WaitingForAgent, ctx.now);
    Ok(())
}

/// Close the conversation politely.
pub async fn send_farewell(ctx: &HandlerCtx<'_>, convo: &mut ConversationState) -> AppResult<()> {
    ctx.send(messages::FAREWELL).await;
    convo.pause(StateTag::Finished, ctx.now);
    Ok(())
}

/// A message in a terminal state starts a fresh attendance.
pub async fn handle_terminal_reentry(ctx: &HandlerCtx<'_>, convo: &mut ConversationState) -> AppResult<()> {
    ctx.send(messages::HELLO_AGAIN).await;
    ctx.send(messages::MENU_OPTIONS).await;
    convo.advance(StateTag::AskedOption, ctx.now);
    Ok(())
}

/// Unrecognized stored tag: apologize and reset the whole record.
pub async fn handle_unknown_state(ctx: &HandlerCtx<'_>, convo: &mut ConversationState) -> AppResult<()> {
    log::warn!("Chat {} had an unknown state tag, resetting", ctx.chat_id);
    ctx.send(messages::RESTART).await;
    ctx.send(messages::GREETING).await;
    ctx.send(messages::MENU_OPTIONS).await;
    *convo = ConversationState::new(ctx.now);
    Ok(())
}
