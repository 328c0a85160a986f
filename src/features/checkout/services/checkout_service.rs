use std::sync::Arc;

use minijinja::{context, Environment};
use rust_decimal::Decimal;

use crate::core::error::{AppError, Result};
use crate::features::checkout::dtos::{
    BuildQuoteItemDto, BuildQuoteRequestDto, ReadyPcInterestDto, WhatsAppLinkDto,
};
use crate::features::profiles::models::Sector;
use crate::features::ready_pcs::services::ReadyPcService;
use crate::features::settings::services::SettingsService;

const BUILD_QUOTE_TEMPLATE: &str = "Olá! Gostaria de montar um PC com os seguintes componentes:\n\n\
{% for item in items %}{{ item.label }}: {{ item.product_name }}\n{% endfor %}\n\
Poderia me ajudar com um orçamento?";

const READY_PC_TEMPLATE: &str = "Olá! Tenho interesse no PC Pronto: {{ name }}\n\n\
Preço: R$ {{ price }}\n\nPoderia me dar mais informações?";

/// Service building WhatsApp checkout hand-off links.
///
/// The storefront has no cart/checkout of its own: orders are negotiated
/// over WhatsApp with the attendant matching the visitor's sector.
pub struct CheckoutService {
    settings: Arc<SettingsService>,
    ready_pcs: Arc<ReadyPcService>,
    templates: Environment<'static>,
}

impl CheckoutService {
    pub fn new(settings: Arc<SettingsService>, ready_pcs: Arc<ReadyPcService>) -> Self {
        let mut templates = Environment::new();
        templates
            .add_template("build_quote", BUILD_QUOTE_TEMPLATE)
            .expect("build quote template must compile");
        templates
            .add_template("ready_pc", READY_PC_TEMPLATE)
            .expect("ready pc template must compile");

        Self {
            settings,
            ready_pcs,
            templates,
        }
    }

    /// Deep link format: https://wa.me/<phone>?text=<url-encoded message>
    fn build_link(phone: &str, message: &str) -> String {
        format!(
            "https://wa.me/{}?text={}",
            phone,
            urlencoding::encode(message)
        )
    }

    /// Brazilian currency formatting: thousands separated by '.', cents by ','
    fn format_brl(value: Decimal) -> String {
        let rounded = value.round_dp(2);
        let raw = format!("{:.2}", rounded);
        let (integer, cents) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));

        let (sign, digits) = match integer.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", integer),
        };

        let mut grouped = String::new();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        format!("{}{},{}", sign, grouped, cents)
    }

    fn render_build_quote(&self, items: &[BuildQuoteItemDto]) -> Result<String> {
        self.templates
            .get_template("build_quote")
            .and_then(|t| t.render(context! { items }))
            .map_err(|e| AppError::Internal(format!("Failed to render checkout message: {}", e)))
    }

    fn render_ready_pc(&self, name: &str, price: Decimal) -> Result<String> {
        self.templates
            .get_template("ready_pc")
            .and_then(|t| t.render(context! { name, price => Self::format_brl(price) }))
            .map_err(|e| AppError::Internal(format!("Failed to render checkout message: {}", e)))
    }

    /// Hand-off link for a build-your-own-PC quote
    pub async fn build_quote_link(&self, dto: BuildQuoteRequestDto) -> Result<WhatsAppLinkDto> {
        let message = self.render_build_quote(&dto.items)?;
        let settings = self.settings.get().await?;
        let phone = settings.whatsapp_for(dto.sector).to_string();

        Ok(WhatsAppLinkDto {
            url: Self::build_link(&phone, &message),
            phone,
        })
    }

    /// Hand-off link for a ready-built PC, quoting the sector's price tier
    pub async fn ready_pc_link(&self, dto: ReadyPcInterestDto) -> Result<WhatsAppLinkDto> {
        let pc = self.ready_pcs.get_by_id(dto.ready_pc_id).await?;

        let price = match dto.sector {
            Sector::Varejo => pc.price_varejo,
            Sector::Revenda => pc.price_revenda,
        };

        let message = self.render_ready_pc(&pc.name, price)?;
        let settings = self.settings.get().await?;
        let phone = settings.whatsapp_for(dto.sector).to_string();

        Ok(WhatsAppLinkDto {
            url: Self::build_link(&phone, &message),
            phone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_link_encodes_message() {
        let url = CheckoutService::build_link("558534833373", "Olá! Tudo bem?");
        assert!(url.starts_with("https://wa.me/558534833373?text="));
        assert!(url.contains("Ol%C3%A1%21%20Tudo%20bem%3F"));
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(CheckoutService::format_brl(Decimal::new(500000, 2)), "5.000,00");
        assert_eq!(CheckoutService::format_brl(Decimal::new(123456789, 2)), "1.234.567,89");
        assert_eq!(CheckoutService::format_brl(Decimal::new(999, 2)), "9,99");
        assert_eq!(CheckoutService::format_brl(Decimal::ZERO), "0,00");
    }

    #[test]
    fn test_build_quote_message_lists_components() {
        let mut env = Environment::new();
        env.add_template("build_quote", BUILD_QUOTE_TEMPLATE).unwrap();

        let items = vec![
            BuildQuoteItemDto {
                label: "Processador".to_string(),
                product_name: "Ryzen 5 5600".to_string(),
            },
            BuildQuoteItemDto {
                label: "Placa de Vídeo".to_string(),
                product_name: "RTX 4060".to_string(),
            },
        ];

        let message = env
            .get_template("build_quote")
            .unwrap()
            .render(context! { items })
            .unwrap();

        assert!(message.starts_with("Olá! Gostaria de montar um PC"));
        assert!(message.contains("Processador: Ryzen 5 5600"));
        assert!(message.contains("Placa de Vídeo: RTX 4060"));
        assert!(message.ends_with("Poderia me ajudar com um orçamento?"));
    }

    #[test]
    fn test_ready_pc_message_includes_price() {
        let mut env = Environment::new();
        env.add_template("ready_pc", READY_PC_TEMPLATE).unwrap();

        let message = env
            .get_template("ready_pc")
            .unwrap()
            .render(context! {
                name => "PC Gamer Starter",
                price => CheckoutService::format_brl(Decimal::new(450000, 2)),
            })
            .unwrap();

        assert!(message.contains("PC Pronto: PC Gamer Starter"));
        assert!(message.contains("Preço: R$ 4.500,00"));
    }
}
