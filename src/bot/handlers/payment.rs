//! Payment selection: card installments, PIX/cash, and the trade-in chain.

use crate::bot::handlers::{checkout, menu, HandlerCtx};
use crate::bot::messages;
use crate::bot::state::{ComplementMethod, ConversationState, PaymentMethod, StateTag};
use crate::core::error::AppResult;
use crate::pricing;

/// Main payment choice: 1 card, 2 PIX/cash, 3 used device in trade.
pub async fn handle_payment_method(ctx: &HandlerCtx<'_>, convo: &mut ConversationState, message: &str) -> AppResult<()> {
    match message {
        "1" => {
            let Some(base) = chosen_price(ctx, convo).await? else {
                return Ok(());
            };
            convo.payment_method = Some(PaymentMethod::Card);
            ctx.send("Você selecionou Cartão de Crédito. A taxa da maquininha varia com o número de parcelas.")
                .await;
            send_installment_table(ctx, base).await;
            convo.advance(StateTag::AskedCreditInstallments, ctx.now);
            Ok(())
        }
        "2" => {
            convo.payment_method = Some(PaymentMethod::PixCash);
            ctx.send(messages::PIX_SELECTED).await;
            checkout::ask_client_data(ctx, convo).await
        }
        "3" => {
            convo.payment_method = Some(PaymentMethod::TradeIn);
            ctx.send(messages::TRADE_IN_INTRO).await;
            ctx.send(messages::ASK_USED_MODEL).await;
            convo.advance(StateTag::AskedUsedPhoneModel, ctx.now);
            Ok(())
        }
        _ => {
            ctx.send(messages::INVALID_PAYMENT_OPTION).await;
            Ok(())
        }
    }
}

/// Installment count for whichever card leg is active (full price or the
/// remainder after the trade-in credit).
pub async fn handle_credit_installments(
    ctx: &HandlerCtx<'_>,
    convo: &mut ConversationState,
    message: &str,
) -> AppResult<()> {
    let count: u32 = match message.parse() {
        Ok(n) if (1..=pricing::MAX_INSTALLMENTS).contains(&n) => n,
        _ => {
            ctx.send(messages::INVALID_INSTALLMENTS).await;
            return Ok(());
        }
    };

    let Some(base) = chosen_price(ctx, convo).await? else {
        return Ok(());
    };

    convo.installments = Some(count);
    let quote = pricing::final_price(base, convo.payment_method, convo.payment_complement, Some(count));
    let per_month = pricing::round2(quote.total / count as f64);
    ctx.send(&format!(
        "Você escolheu {}x de R$ {:.2} (total R$ {:.2}).",
        count, per_month, quote.total
    ))
    .await;

    checkout::ask_client_data(ctx, convo).await
}

pub async fn handle_used_phone_model(
    ctx: &HandlerCtx<'_>,
    convo: &mut ConversationState,
    message: &str,
) -> AppResult<()> {
    convo.used_model = Some(message.to_string());
    ctx.send(messages::ASK_USED_STORAGE).await;
    convo.advance(StateTag::AskedUsedPhoneStorage, ctx.now);
    Ok(())
}

pub async fn handle_used_phone_storage(
    ctx: &HandlerCtx<'_>,
    convo: &mut ConversationState,
    message: &str,
) -> AppResult<()> {
    convo.used_storage = Some(message.to_string());
    ctx.send(messages::ASK_USED_BATTERY).await;
    convo.advance(StateTag::AskedUsedPhoneBattery, ctx.now);
    Ok(())
}

pub async fn handle_used_phone_battery(
    ctx: &HandlerCtx<'_>,
    convo: &mut ConversationState,
    message: &str,
) -> AppResult<()> {
    convo.used_battery = Some(message.to_string());
    ctx.send(messages::ASK_USED_FACE_ID).await;
    convo.advance(StateTag::AskedUsedPhoneFaceId, ctx.now);
    Ok(())
}

pub async fn handle_used_phone_face_id(
    ctx: &HandlerCtx<'_>,
    convo: &mut ConversationState,
    message: &str,
) -> AppResult<()> {
    convo.used_face_id = Some(message.to_string());
    ctx.send(messages::ASK_USED_DEFECTS).await;
    convo.advance(StateTag::AskedUsedPhoneDefects, ctx.now);
    Ok(())
}

pub async fn handle_used_phone_defects(
    ctx: &HandlerCtx<'_>,
    convo: &mut ConversationState,
    message: &str,
) -> AppResult<()> {
    convo.used_defects = Some(message.to_string());
    ctx.send(messages::COMPLEMENT_OPTIONS).await;
    convo.advance(StateTag::AskedComplementPaymentMethod, ctx.now);
    Ok(())
}

/// How the remainder after the trade-in credit is paid: 1 card, 2 PIX/cash.
pub async fn handle_complement_payment_method(
    ctx: &HandlerCtx<'_>,
    convo: &mut ConversationState,
    message: &str,
) -> AppResult<()> {
    match message {
        "1" => {
            let Some(base) = chosen_price(ctx, convo).await? else {
                return Ok(());
            };
            convo.payment_complement = Some(ComplementMethod::Card);
            let remainder = (base - pricing::TRADE_IN_CREDIT).max(0.0);
            ctx.send(&format!(
                "Você escolheu pagar o restante no Cartão de Crédito. \
                 Com o desconto de R$ {:.2} do seu aparelho, o valor a parcelar é R$ {:.2}.",
                pricing::TRADE_IN_CREDIT,
                remainder
            ))
            .await;
            send_installment_table(ctx, remainder).await;
            convo.advance(StateTag::AskedCreditInstallments, ctx.now);
            Ok(())
        }
        "2" => {
            convo.payment_complement = Some(ComplementMethod::PixCash);
            ctx.send(messages::COMPLEMENT_PIX_SELECTED).await;
            checkout::ask_client_data(ctx, convo).await
        }
        _ => {
            ctx.send(messages::INVALID_COMPLEMENT_OPTION).await;
            Ok(())
        }
    }
}

/// Price of the chosen product, or `None` after resetting a conversation
/// whose record lost it (older revisions could drop it mid-flow).
async fn chosen_price(ctx: &HandlerCtx<'_>, convo: &mut ConversationState) -> AppResult<Option<f64>> {
    match &convo.chosen_product {
        Some(product) => Ok(Some(product.preco)),
        None => {
            log::warn!("Chat {} reached payment without a chosen product", ctx.chat_id);
            menu::handle_unknown_state(ctx, convo).await?;
            Ok(None)
        }
    }
}

async fn send_installment_table(ctx: &HandlerCtx<'_>, base: f64) {
    ctx.send(&pricing::installment_table(base)).await;
    ctx.send(messages::INSTALLMENTS_PROMPT).await;
}
