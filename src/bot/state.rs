//! Conversation record and state tags.
//!
//! One `ConversationState` per canonical chat id, persisted as JSON by the
//! state store. The `StateTag` drives dispatch; tags serialize to the
//! historical SCREAMING_SNAKE_CASE wire names, and anything unrecognized in
//! a stored file deserializes to `Unknown` so the dispatcher can reset the
//! conversation instead of crashing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

/// Current step of the scripted flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StateTag {
    /// Main menu sent, waiting for 1-5
    AskedOption,

    // Buy trail
    AskedModelName,
    AskedModelNumber,
    ConfirmPurchase,
    AskedPaymentMethod,
    AskedCreditInstallments,

    // Trade-in chain (used device as part of the payment)
    AskedUsedPhoneModel,
    AskedUsedPhoneStorage,
    AskedUsedPhoneBattery,
    AskedUsedPhoneFaceId,
    AskedUsedPhoneDefects,
    AskedComplementPaymentMethod,

    // Checkout
    AskedName,
    AskedCpf,
    AskedPhone,
    AskedAddress,
    AskedNeighborhood,
    AskedZip,
    AskedEmail,

    // Repair trail
    AskedTechOption,
    AskedPhoneModel,
    AskedServiceConfirmation,
    AskedProblemDescription,

    // Sell trail (customer sells us a used device)
    AskedUsedPhoneModelSell,
    AskedUsedPhoneStorageSell,
    AskedUsedPhoneBatterySell,
    AskedUsedPhoneFaceIdSell,
    AskedUsedPhoneDefectsSell,
    AskedUsedPhonePhotosSell,

    // Agent handoff (absorbing)
    WaitingForAgent,

    // Terminal
    Finished,
    SessionEnded,

    /// Unrecognized tag in a stored file; the dispatcher resets to the greeting
    Unknown,
}

impl StateTag {
    /// Terminal tags restart the greeting flow on the next inbound message.
    pub fn is_terminal(self) -> bool {
        matches!(self, StateTag::Finished | StateTag::SessionEnded)
    }
}

/// Tags written by older flow revisions must not break a stored file:
/// anything unrecognized becomes `Unknown` and the dispatcher resets that
/// conversation.
impl<'de> Deserialize<'de> for StateTag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(tag.parse().unwrap_or(StateTag::Unknown))
    }
}

/// How the customer pays for the chosen device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "CARTAO")]
    Card,
    #[serde(rename = "PIX_DINHEIRO")]
    PixCash,
    #[serde(rename = "USADO")]
    TradeIn,
}

impl PaymentMethod {
    /// Label used on the receipt.
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Card => "Cartão de Crédito",
            PaymentMethod::PixCash => "PIX/Dinheiro",
            PaymentMethod::TradeIn => "Aparelho usado + complemento",
        }
    }
}

/// How the remainder is paid when a used device covers part of the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplementMethod {
    #[serde(rename = "CARTAO")]
    Card,
    #[serde(rename = "PIX_DINHEIRO")]
    PixCash,
}

impl ComplementMethod {
    pub fn label(self) -> &'static str {
        match self {
            ComplementMethod::Card => "Cartão de Crédito",
            ComplementMethod::PixCash => "PIX/Dinheiro",
        }
    }
}

/// Repair service requested on the technical-assistance trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepairService {
    #[serde(rename = "TELA")]
    Screen,
    #[serde(rename = "BATERIA")]
    Battery,
    #[serde(rename = "TAMPA")]
    BackCover,
}

impl RepairService {
    /// Lowercase Portuguese name as it appears in customer-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            RepairService::Screen => "tela",
            RepairService::Battery => "bateria",
            RepairService::BackCover => "tampa traseira",
        }
    }
}

/// One row of the sealed/used device catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub produto: String,
    pub preco: f64,
    pub cor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detalhe: Option<String>,
}

impl Product {
    /// Display condition: sealed when there is no detail note, used otherwise.
    pub fn condition(&self) -> String {
        match &self.detalhe {
            None => "Lacrado".to_string(),
            Some(d) => format!("Seminovo ({})", d),
        }
    }
}

/// Full conversation record, one per canonical chat id.
///
/// Transient fields are filled in incrementally as the flow advances and
/// read back by the pricing calculator and the receipt renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    pub state: StateTag,
    pub last_interaction: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub idle_warning_sent: bool,
    #[serde(default)]
    pub agent_mode: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chosen_product: Option<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_complement: Option<ComplementMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<u32>,

    // Used-device attributes, shared by the trade-in and sell trails
    // (the two trails are mutually exclusive within one conversation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_storage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_battery: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_face_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_defects: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_photos_note: Option<String>,

    // Customer identity and delivery address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<RepairService>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_in_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_price: Option<f64>,
}

impl ConversationState {
    /// Fresh record seeded by the greeting handler.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            state: StateTag::AskedOption,
            last_interaction: now,
            pause_start_time: None,
            idle_warning_sent: false,
            agent_mode: false,
            products: Vec::new(),
            chosen_product: None,
            payment_method: None,
            payment_complement: None,
            installments: None,
            used_model: None,
            used_storage: None,
            used_battery: None,
            used_face_id: None,
            used_defects: None,
            used_photos_note: None,
            name: None,
            cpf: None,
            phone: None,
            address: None,
            neighborhood: None,
            zip: None,
            email: None,
            service_type: None,
            trade_in_value: None,
            final_price: None,
        }
    }

    /// Advance to `state` and refresh the interaction timestamp.
    pub fn advance(&mut self, state: StateTag, now: DateTime<Utc>) {
        self.state = state;
        self.last_interaction = now;
        self.idle_warning_sent = false;
    }

    /// Enter a terminal/paused tag, stamping `pause_start_time`.
    pub fn pause(&mut self, state: StateTag, now: DateTime<Utc>) {
        self.state = state;
        self.pause_start_time = Some(now);
    }
}
