//! Purchase receipt rendering.
//!
//! Fixed-layout HTML document assembled from the conversation record and
//! handed to the message sender as an attachment. Missing optional fields
//! render blank — an incomplete record still produces a deliverable
//! document.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::bot::state::{ConversationState, PaymentMethod};
use crate::core::error::AppResult;

/// Render the receipt HTML for a finished purchase.
pub fn render(convo: &ConversationState, now: DateTime<Utc>) -> String {
    let name = html_escape(convo.name.as_deref().unwrap_or(""));
    let cpf = html_escape(convo.cpf.as_deref().unwrap_or(""));
    let email = html_escape(convo.email.as_deref().unwrap_or(""));
    let address = html_escape(convo.address.as_deref().unwrap_or(""));
    let neighborhood = html_escape(convo.neighborhood.as_deref().unwrap_or(""));
    let zip = html_escape(convo.zip.as_deref().unwrap_or(""));

    let (product_name, product_price) = match &convo.chosen_product {
        Some(p) => (html_escape(&p.produto), format!("R$ {:.2}", p.preco)),
        None => (String::new(), String::new()),
    };

    let payment_label = convo.payment_method.map(|m| m.label()).unwrap_or("");

    let mut payment_extras = String::new();
    if convo.payment_method == Some(PaymentMethod::TradeIn) {
        let complement = convo.payment_complement.map(|c| c.label()).unwrap_or("");
        payment_extras.push_str(&format!(
            "<p><strong>Forma de Pagamento Complementar:</strong> {}</p>\n",
            complement
        ));
    }
    if let Some(credit) = convo.trade_in_value.filter(|v| *v > 0.0) {
        payment_extras.push_str(&format!(
            "<p><strong>Valor de troca do aparelho usado:</strong> R$ {:.2}</p>\n",
            credit
        ));
    }
    let card_leg = convo.payment_method == Some(PaymentMethod::Card)
        || convo.payment_complement == Some(crate::bot::state::ComplementMethod::Card);
    if let Some(n) = convo.installments.filter(|_| card_leg) {
        payment_extras.push_str(&format!("<p><strong>Parcelamento:</strong> {}x no cartão</p>\n", n));
    }

    let final_price = convo.final_price.unwrap_or(0.0);

    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Nota/Recibo</title>
<style>
body{{font-family:Arial,sans-serif;margin:20px;padding:20px;border:1px solid #ccc;max-width:600px}}
h1{{text-align:center;text-transform:uppercase}}
.details{{margin-bottom:20px}}
.details div{{margin:5px 0}}
.footer{{text-align:center;margin-top:30px}}
</style>
</head>
<body>
<h1>Recibo de Compra</h1>
<div class="details">
<div><strong>Data:</strong> <span>{date}</span></div>
<div><strong>Cliente:</strong> <span>{name}</span></div>
<div><strong>Endereço:</strong> <span>{address}, {neighborhood}, {zip}</span></div>
<div><strong>CPF:</strong> <span>{cpf}</span></div>
<div><strong>E-mail:</strong> <span>{email}</span></div>
</div>

<h2>Detalhes do Pedido</h2>
<table border="1" width="100%" cellpadding="5" cellspacing="0">
<thead>
<tr><th>Item</th><th>Modelo</th><th>Quantidade</th><th>Preço Unitário</th><th>Total</th></tr>
</thead>
<tbody>
<tr><td>Smartphone</td><td>{product_name}</td><td>1</td><td>{product_price}</td><td>{product_price}</td></tr>
</tbody>
</table>

<div style="margin-top: 20px;">
<p><strong>Forma de Pagamento:</strong> {payment_label}</p>
{payment_extras}<p><strong>Valor Final (após taxas/descontos):</strong> R$ {final_price:.2}</p>
</div>

<div class="footer">
<p>Obrigado pela sua compra!</p>
<p>Zaploja</p>
</div>
</body>
</html>"#,
        date = now.format("%d/%m/%Y"),
        name = name,
        address = address,
        neighborhood = neighborhood,
        zip = zip,
        cpf = cpf,
        email = email,
        product_name = product_name,
        product_price = product_price,
        payment_label = payment_label,
        payment_extras = payment_extras,
        final_price = final_price,
    )
}

/// Write the rendered receipt under `dir` and return its path.
pub fn generate(convo: &ConversationState, chat_id: &str, dir: &Path, now: DateTime<Utc>) -> AppResult<PathBuf> {
    fs_err::create_dir_all(dir)?;
    let path = dir.join(format!("{}_receipt.html", chat_id));
    fs_err::write(&path, render(convo, now))?;
    log::info!("Receipt written to {}", path.display());
    Ok(path)
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::state::{ComplementMethod, Product, StateTag};
    use crate::pricing;

    fn full_record() -> ConversationState {
        let now = Utc::now();
        let mut convo = ConversationState::new(now);
        convo.chosen_product = Some(Product {
            produto: "iPhone 12 128GB".into(),
            preco: 3500.0,
            cor: "Preto".into(),
            detalhe: None,
        });
        convo.payment_method = Some(PaymentMethod::TradeIn);
        convo.payment_complement = Some(ComplementMethod::Card);
        convo.installments = Some(12);
        convo.trade_in_value = Some(pricing::TRADE_IN_CREDIT);
        convo.final_price = Some(3480.37);
        convo.name = Some("Maria da Silva".into());
        convo.cpf = Some("123.456.789-00".into());
        convo.address = Some("Rua das Flores, 10".into());
        convo.neighborhood = Some("Centro".into());
        convo.zip = Some("01000-000".into());
        convo.email = Some("maria@example.com".into());
        convo.state = StateTag::Finished;
        convo
    }

    #[test]
    fn test_render_full_record() {
        let html = render(&full_record(), Utc::now());
        assert!(html.contains("Recibo de Compra"));
        assert!(html.contains("Maria da Silva"));
        assert!(html.contains("iPhone 12 128GB"));
        assert!(html.contains("R$ 3500.00"));
        assert!(html.contains("Forma de Pagamento Complementar:</strong> Cartão de Crédito"));
        assert!(html.contains("Valor de troca do aparelho usado:</strong> R$ 400.00"));
        assert!(html.contains("12x no cartão"));
        assert!(html.contains("R$ 3480.37"));
    }

    #[test]
    fn test_render_tolerates_missing_fields() {
        let convo = ConversationState::new(Utc::now());
        let html = render(&convo, Utc::now());
        assert!(html.contains("Recibo de Compra"));
        assert!(html.contains("<strong>Cliente:</strong> <span></span>"));
        assert!(html.contains("R$ 0.00"));
        // no trade-in, no complement line
        assert!(!html.contains("Complementar"));
    }

    #[test]
    fn test_render_escapes_html() {
        let mut convo = ConversationState::new(Utc::now());
        convo.name = Some("<script>alert(1)</script>".into());
        let html = render(&convo, Utc::now());
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_generate_writes_file_named_after_chat() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = generate(&full_record(), "5511999990000", dir.path(), Utc::now()).unwrap();
        assert!(path.ends_with("5511999990000_receipt.html"));
        let contents = fs_err::read_to_string(&path).unwrap();
        assert!(contents.contains("Maria da Silva"));
    }
}
