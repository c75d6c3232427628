//! Checkout: identity/address collection, final price, receipt delivery.

use crate::bot::handlers::HandlerCtx;
use crate::bot::messages;
use crate::bot::state::{ConversationState, StateTag};
use crate::core::error::AppResult;
use crate::pricing;
use crate::receipt;

/// Start the identity/address questionnaire.
pub async fn ask_client_data(ctx: &HandlerCtx<'_>, convo: &mut ConversationState) -> AppResult<()> {
    ctx.send(messages::ASK_CLIENT_DATA).await;
    ctx.send(messages::ASK_NAME).await;
    convo.advance(StateTag::AskedName, ctx.now);
    Ok(())
}

/// One questionnaire answer per turn, ending in the receipt.
pub async fn collect_client_data(ctx: &HandlerCtx<'_>, convo: &mut ConversationState, message: &str) -> AppResult<()> {
    match convo.state {
        StateTag::AskedName => {
            convo.name = Some(message.to_string());
            ctx.send(messages::ASK_CPF).await;
            convo.advance(StateTag::AskedCpf, ctx.now);
        }
        StateTag::AskedCpf => {
            convo.cpf = Some(message.to_string());
            ctx.send(messages::ASK_PHONE).await;
            convo.advance(StateTag::AskedPhone, ctx.now);
        }
        StateTag::AskedPhone => {
            convo.phone = Some(message.to_string());
            ctx.send(messages::ASK_ADDRESS).await;
            convo.advance(StateTag::AskedAddress, ctx.now);
        }
        StateTag::AskedAddress => {
            convo.address = Some(message.to_string());
            ctx.send(messages::ASK_NEIGHBORHOOD).await;
            convo.advance(StateTag::AskedNeighborhood, ctx.now);
        }
        StateTag::AskedNeighborhood => {
            convo.neighborhood = Some(message.to_string());
            ctx.send(messages::ASK_ZIP).await;
            convo.advance(StateTag::AskedZip, ctx.now);
        }
        StateTag::AskedZip => {
            convo.zip = Some(message.to_string());
            ctx.send(messages::ASK_EMAIL).await;
            convo.advance(StateTag::AskedEmail, ctx.now);
        }
        StateTag::AskedEmail => {
            convo.email = Some(message.to_string());
            ctx.send(messages::GENERATING_RECEIPT).await;
            finalize_purchase(ctx, convo).await?;
        }
        other => {
            log::warn!("collect_client_data called in unexpected state {}", other);
        }
    }
    Ok(())
}

/// Compute the final price, render the receipt and hand it over.
///
/// The price fields are stored before the receipt is written: if the write
/// fails, the priced record is still saved and the conversation stays on
/// the e-mail step.
async fn finalize_purchase(ctx: &HandlerCtx<'_>, convo: &mut ConversationState) -> AppResult<()> {
    let base = convo.chosen_product.as_ref().map(|p| p.preco).unwrap_or(0.0);
    let quote = pricing::final_price(base, convo.payment_method, convo.payment_complement, convo.installments);
    convo.trade_in_value = Some(quote.trade_in_credit);
    convo.final_price = Some(quote.total);

    let receipt_path = receipt::generate(convo, ctx.chat_id, &ctx.deps.receipts_dir, ctx.now)?;

    ctx.send(messages::RECEIPT_READY).await;
    ctx.send_document(&receipt_path).await;

    convo.advance(StateTag::Finished, ctx.now);
    convo.pause_start_time = Some(ctx.now);
    Ok(())
}
