//! Technical-assistance trail: service menu, price lookup, scheduling.

use crate::bot::handlers::HandlerCtx;
use crate::bot::messages;
use crate::bot::state::{ConversationState, RepairService, StateTag};
use crate::core::error::AppResult;

/// Show the repair service menu.
pub async fn ask_tech_options(ctx: &HandlerCtx<'_>, convo: &mut ConversationState) -> AppResult<()> {
    ctx.send(messages::TECH_OPTIONS).await;
    convo.advance(StateTag::AskedTechOption, ctx.now);
    Ok(())
}

/// Service choice: 1 screen, 2 battery, 3 back cover, 4 free description.
pub async fn handle_tech_option_choice(
    ctx: &HandlerCtx<'_>,
    convo: &mut ConversationState,
    message: &str,
) -> AppResult<()> {
    let service = match message {
        "1" => Some(RepairService::Screen),
        "2" => Some(RepairService::Battery),
        "3" => Some(RepairService::BackCover),
        "4" => None,
        _ => {
            ctx.send(messages::INVALID_TECH_OPTION).await;
            return Ok(());
        }
    };

    match service {
        Some(service) => {
            convo.service_type = Some(service);
            ctx.send(messages::ASK_REPAIR_MODEL).await;
            convo.advance(StateTag::AskedPhoneModel, ctx.now);
        }
        None => {
            ctx.send(messages::ASK_PROBLEM_DESCRIPTION).await;
            convo.advance(StateTag::AskedProblemDescription, ctx.now);
        }
    }
    Ok(())
}

/// Quote the chosen service for the informed model.
pub async fn handle_phone_model(ctx: &HandlerCtx<'_>, convo: &mut ConversationState, message: &str) -> AppResult<()> {
    let Some(service) = convo.service_type else {
        // Record from a revision that lost the service choice mid-flow
        ctx.send(messages::RESTART).await;
        return ask_tech_options(ctx, convo).await;
    };

    let entry = match ctx.deps.repair_prices.lookup(message) {
        Ok(entry) => entry,
        Err(e) => {
            log::error!("Repair price lookup failed for '{}': {}", message, e);
            ctx.send(messages::REPAIR_LOOKUP_ERROR).await;
            return Ok(());
        }
    };

    let Some(entry) = entry else {
        ctx.send(&format!(
            "Desculpe, não encontramos o modelo {} em nosso sistema.",
            message
        ))
        .await;
        ctx.send("Por favor, informe o modelo novamente!").await;
        return Ok(());
    };

    let Some(price) = entry.price_for(service) else {
        ctx.send(&format!(
            "Desculpe, não possuo o serviço de {} para o modelo {}.",
            service.label(),
            message
        ))
        .await;
        ctx.send("Por favor, informe outro modelo ou peça um orçamento específico.")
            .await;
        return ask_tech_options(ctx, convo).await;
    };

    ctx.send(&format!(
        "O valor para trocar a {} do seu {} é R$ {:.2}.",
        service.label(),
        message,
        price
    ))
    .await;
    ctx.send(messages::SERVICE_CONFIRM_PROMPT).await;
    convo.advance(StateTag::AskedServiceConfirmation, ctx.now);
    Ok(())
}

/// Yes schedules the service; either answer closes the conversation.
pub async fn handle_service_confirmation(
    ctx: &HandlerCtx<'_>,
    convo: &mut ConversationState,
    message: &str,
) -> AppResult<()> {
    match message.to_uppercase().as_str() {
        "SIM" | "✅" => {
            ctx.send(messages::SERVICE_SCHEDULED).await;
            convo.pause(StateTag::Finished, ctx.now);
        }
        "NÃO" | "NAO" | "❌" => {
            ctx.send(messages::ANYTHING_ELSE).await;
            convo.pause(StateTag::Finished, ctx.now);
        }
        _ => {
            ctx.send("Desculpe, não entendi. Por favor, responda com 'Sim' ou 'Não'.")
                .await;
        }
    }
    Ok(())
}

/// Free-form problem report: acknowledged, a technician follows up.
pub async fn handle_problem_description(
    ctx: &HandlerCtx<'_>,
    convo: &mut ConversationState,
    _message: &str,
) -> AppResult<()> {
    ctx.send(messages::PROBLEM_RECEIVED).await;
    convo.pause(StateTag::Finished, ctx.now);
    Ok(())
}
