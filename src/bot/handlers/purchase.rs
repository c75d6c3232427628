//! Buy trail: model search, selection and purchase confirmation.

use crate::bot::handlers::{menu, HandlerCtx};
use crate::bot::messages;
use crate::bot::state::{ConversationState, StateTag};
use crate::core::error::AppResult;

/// Ask which model the customer wants and enter the search state.
pub async fn ask_model_name(ctx: &HandlerCtx<'_>, convo: &mut ConversationState) -> AppResult<()> {
    ctx.send(messages::ASK_MODEL_NAME).await;
    convo.advance(StateTag::AskedModelName, ctx.now);
    Ok(())
}

/// Search the catalog for the requested model and list the matches.
///
/// `M`/`S` escape to the menu or close the conversation; an empty result is
/// not a dead end, the customer is offered a retry with a similar model.
pub async fn handle_model_search(ctx: &HandlerCtx<'_>, convo: &mut ConversationState, message: &str) -> AppResult<()> {
    match message.to_uppercase().as_str() {
        "M" => return back_to_menu(ctx, convo).await,
        "S" => return menu::send_farewell(ctx, convo).await,
        _ => {}
    }

    let results = match ctx.deps.catalog.search(message) {
        Ok(results) => results,
        Err(e) => {
            log::error!("Catalog search failed for '{}': {}", message, e);
            ctx.send(messages::CATALOG_ERROR).await;
            return Ok(());
        }
    };

    if results.is_empty() {
        ctx.send(messages::PRODUCT_NOT_FOUND).await;
        ctx.send(messages::PRODUCT_NOT_FOUND_OPTIONS).await;
        return Ok(());
    }

    let mut listing = format!("{}\n", messages::PRODUCT_LIST_HEADER);
    for (i, product) in results.iter().enumerate() {
        listing.push_str(&format!(
            "{}. Produto: {}\n   Cor: {}\n   Estado: {}\n   Preço: R$ {:.2}\n\n",
            i + 1,
            product.produto,
            product.cor,
            product.condition(),
            product.preco,
        ));
    }
    ctx.send(&listing).await;
    ctx.send(messages::PRODUCT_LIST_PROMPT).await;

    convo.products = results;
    convo.advance(StateTag::AskedModelNumber, ctx.now);
    Ok(())
}

/// Numeric pick from the listed models, or N/M/S escapes.
pub async fn handle_model_number_choice(
    ctx: &HandlerCtx<'_>,
    convo: &mut ConversationState,
    message: &str,
) -> AppResult<()> {
    match message.to_uppercase().as_str() {
        "N" => return ask_model_name(ctx, convo).await,
        "M" => return back_to_menu(ctx, convo).await,
        "S" => return menu::send_farewell(ctx, convo).await,
        _ => {}
    }

    let choice: usize = match message.parse() {
        Ok(n) => n,
        Err(_) => {
            ctx.send(messages::INVALID_MODEL_INPUT).await;
            return Ok(());
        }
    };

    if choice == 0 || choice > convo.products.len() {
        ctx.send(messages::INVALID_MODEL_NUMBER).await;
        return Ok(());
    }

    let product = convo.products[choice - 1].clone();
    ctx.send(&format!(
        "Você escolheu o seguinte produto:\n\
         Produto: {}\n\
         Cor: {}\n\
         Estado: {}\n\
         Preço: R$ {:.2}\n\n\
         Você gostaria de prosseguir com a compra?\n\
         Digite 'Sim' para confirmar, ou escolha uma opção:\n\
         N - Escolher outro modelo\n\
         M - Menu Principal\n\
         S - Sair",
        product.produto,
        product.cor,
        product.condition(),
        product.preco,
    ))
    .await;

    convo.chosen_product = Some(product);
    convo.advance(StateTag::ConfirmPurchase, ctx.now);
    Ok(())
}

/// Yes/no on the chosen device, with the same N/M/S escapes.
pub async fn handle_confirm_purchase(
    ctx: &HandlerCtx<'_>,
    convo: &mut ConversationState,
    message: &str,
) -> AppResult<()> {
    match message.to_uppercase().as_str() {
        "SIM" | "✅" => {
            ctx.send(messages::PAYMENT_OPTIONS).await;
            convo.advance(StateTag::AskedPaymentMethod, ctx.now);
            Ok(())
        }
        "NÃO" | "NAO" | "❌" => {
            ctx.send(messages::ANYTHING_ELSE).await;
            convo.pause(StateTag::Finished, ctx.now);
            Ok(())
        }
        "N" => ask_model_name(ctx, convo).await,
        "M" => back_to_menu(ctx, convo).await,
        "S" => menu::send_farewell(ctx, convo).await,
        _ => {
            ctx.send(messages::CONFIRM_YES_OR_NO).await;
            Ok(())
        }
    }
}

async fn back_to_menu(ctx: &HandlerCtx<'_>, convo: &mut ConversationState) -> AppResult<()> {
    ctx.send(messages::MENU_OPTIONS).await;
    convo.advance(StateTag::AskedOption, ctx.now);
    Ok(())
}
