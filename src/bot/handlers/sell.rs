//! Sell trail: the customer offers us a used device for evaluation.
//!
//! Same questionnaire as the trade-in chain, but it stands alone and ends
//! with a photo request instead of a payment complement; the team makes an
//! offer off-line from the collected answers.

use crate::bot::handlers::HandlerCtx;
use crate::bot::messages;
use crate::bot::state::{ConversationState, StateTag};
use crate::core::error::AppResult;

pub async fn ask_model(ctx: &HandlerCtx<'_>, convo: &mut ConversationState) -> AppResult<()> {
    ctx.send(messages::SELL_INTRO).await;
    ctx.send(messages::ASK_USED_MODEL).await;
    convo.advance(StateTag::AskedUsedPhoneModelSell, ctx.now);
    Ok(())
}

pub async fn handle_model(ctx: &HandlerCtx<'_>, convo: &mut ConversationState, message: &str) -> AppResult<()> {
    convo.used_model = Some(message.to_string());
    ctx.send(messages::ASK_USED_STORAGE).await;
    convo.advance(StateTag::AskedUsedPhoneStorageSell, ctx.now);
    Ok(())
}

pub async fn handle_storage(ctx: &HandlerCtx<'_>, convo: &mut ConversationState, message: &str) -> AppResult<()> {
    convo.used_storage = Some(message.to_string());
    ctx.send(messages::ASK_USED_BATTERY).await;
    convo.advance(StateTag::AskedUsedPhoneBatterySell, ctx.now);
    Ok(())
}

pub async fn handle_battery(ctx: &HandlerCtx<'_>, convo: &mut ConversationState, message: &str) -> AppResult<()> {
    convo.used_battery = Some(message.to_string());
    ctx.send(messages::ASK_USED_FACE_ID).await;
    convo.advance(StateTag::AskedUsedPhoneFaceIdSell, ctx.now);
    Ok(())
}

pub async fn handle_face_id(ctx: &HandlerCtx<'_>, convo: &mut ConversationState, message: &str) -> AppResult<()> {
    convo.used_face_id = Some(message.to_string());
    ctx.send(messages::ASK_USED_DEFECTS).await;
    convo.advance(StateTag::AskedUsedPhoneDefectsSell, ctx.now);
    Ok(())
}

pub async fn handle_defects(ctx: &HandlerCtx<'_>, convo: &mut ConversationState, message: &str) -> AppResult<()> {
    convo.used_defects = Some(message.to_string());
    ctx.send(messages::ASK_SELL_PHOTOS).await;
    convo.advance(StateTag::AskedUsedPhonePhotosSell, ctx.now);
    Ok(())
}

pub async fn handle_photos(ctx: &HandlerCtx<'_>, convo: &mut ConversationState, message: &str) -> AppResult<()> {
    convo.used_photos_note = Some(message.to_string());
    ctx.send(messages::SELL_DONE).await;
    convo.pause(StateTag::Finished, ctx.now);
    Ok(())
}
