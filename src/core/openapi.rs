use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::banners::{dtos as banners_dtos, handlers as banners_handlers};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::checkout::{dtos as checkout_dtos, handlers as checkout_handlers};
use crate::features::clients::{dtos as clients_dtos, handlers as clients_handlers};
use crate::features::featured::{dtos as featured_dtos, handlers as featured_handlers};
use crate::features::files::{dtos as files_dtos, handlers as files_handlers};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::features::profiles::models::Sector;
use crate::features::profiles::{dtos as profiles_dtos, handlers as profiles_handlers};
use crate::features::ready_pcs::{dtos as ready_pcs_dtos, handlers as ready_pcs_handlers};
use crate::features::settings::{dtos as settings_dtos, handlers as settings_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::sign_up,
        auth::handlers::sign_in,
        auth::handlers::sign_in_with_google,
        auth::handlers::sign_out,
        auth::handlers::get_me,
        // Profiles
        profiles_handlers::get_my_profile,
        profiles_handlers::list_profiles,
        profiles_handlers::update_profile,
        profiles_handlers::delete_profile,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::list_explore_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Products
        products_handlers::list_products,
        products_handlers::get_product,
        products_handlers::create_product,
        products_handlers::update_product,
        products_handlers::delete_product,
        // Banners
        banners_handlers::list_banners,
        banners_handlers::list_all_banners,
        banners_handlers::create_banner,
        banners_handlers::update_banner,
        banners_handlers::delete_banner,
        // Clientes
        clients_handlers::list_clientes,
        clients_handlers::create_cliente,
        clients_handlers::update_cliente,
        clients_handlers::toggle_cliente,
        clients_handlers::delete_cliente,
        // Ready PCs
        ready_pcs_handlers::list_ready_pcs,
        ready_pcs_handlers::get_ready_pc,
        ready_pcs_handlers::list_all_ready_pcs,
        ready_pcs_handlers::create_ready_pc,
        ready_pcs_handlers::update_ready_pc,
        ready_pcs_handlers::delete_ready_pc,
        // Featured
        featured_handlers::list_featured,
        featured_handlers::create_featured,
        featured_handlers::update_featured,
        featured_handlers::delete_featured,
        // Store settings
        settings_handlers::get_store_settings,
        settings_handlers::update_store_settings,
        // Checkout
        checkout_handlers::build_quote_link,
        checkout_handlers::ready_pc_link,
        // Files
        files_handlers::upload_image,
        files_handlers::delete_image_by_url,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            auth::dtos::SignUpRequestDto,
            auth::dtos::SignInRequestDto,
            auth::dtos::AuthUserDto,
            auth::dtos::SessionResponseDto,
            auth::dtos::SignUpResponseDto,
            auth::dtos::OAuthRedirectDto,
            auth::dtos::SignOutResponseDto,
            ApiResponse<auth::dtos::SessionResponseDto>,
            ApiResponse<auth::dtos::SignUpResponseDto>,
            ApiResponse<auth::dtos::OAuthRedirectDto>,
            ApiResponse<auth::dtos::SignOutResponseDto>,
            ApiResponse<auth::dtos::AuthUserDto>,
            // Profiles
            Sector,
            profiles_dtos::ProfileResponseDto,
            profiles_dtos::UpdateProfileDto,
            ApiResponse<profiles_dtos::ProfileResponseDto>,
            ApiResponse<Vec<profiles_dtos::ProfileResponseDto>>,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            // Products
            products_dtos::ProductResponseDto,
            products_dtos::CreateProductDto,
            products_dtos::UpdateProductDto,
            ApiResponse<products_dtos::ProductResponseDto>,
            ApiResponse<Vec<products_dtos::ProductResponseDto>>,
            // Banners
            banners_dtos::BannerResponseDto,
            banners_dtos::CreateBannerDto,
            banners_dtos::UpdateBannerDto,
            ApiResponse<banners_dtos::BannerResponseDto>,
            ApiResponse<Vec<banners_dtos::BannerResponseDto>>,
            // Clientes
            clients_dtos::ClienteResponseDto,
            clients_dtos::CreateClienteDto,
            clients_dtos::UpdateClienteDto,
            ApiResponse<clients_dtos::ClienteResponseDto>,
            ApiResponse<Vec<clients_dtos::ClienteResponseDto>>,
            // Ready PCs
            ready_pcs_dtos::ReadyPcComponentDto,
            ready_pcs_dtos::ReadyPcResponseDto,
            ready_pcs_dtos::ComponentInputDto,
            ready_pcs_dtos::CreateReadyPcDto,
            ready_pcs_dtos::UpdateReadyPcDto,
            ApiResponse<ready_pcs_dtos::ReadyPcResponseDto>,
            ApiResponse<Vec<ready_pcs_dtos::ReadyPcResponseDto>>,
            // Featured
            featured_dtos::FeaturedProductDto,
            featured_dtos::FeaturedSlotDto,
            featured_dtos::CreateFeaturedDto,
            featured_dtos::UpdateFeaturedDto,
            ApiResponse<featured_dtos::FeaturedProductDto>,
            ApiResponse<Vec<featured_dtos::FeaturedProductDto>>,
            ApiResponse<featured_dtos::FeaturedSlotDto>,
            // Store settings
            settings_dtos::StoreSettingsDto,
            settings_dtos::UpdateStoreSettingsDto,
            ApiResponse<settings_dtos::StoreSettingsDto>,
            // Checkout
            checkout_dtos::BuildQuoteItemDto,
            checkout_dtos::BuildQuoteRequestDto,
            checkout_dtos::ReadyPcInterestDto,
            checkout_dtos::WhatsAppLinkDto,
            ApiResponse<checkout_dtos::WhatsAppLinkDto>,
            // Files
            files_dtos::UploadImageDto,
            files_dtos::ImageUploadResponseDto,
            files_dtos::DeleteImageByUrlDto,
            files_dtos::DeleteImageResponseDto,
            ApiResponse<files_dtos::ImageUploadResponseDto>,
            ApiResponse<files_dtos::DeleteImageResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "profiles", description = "User profile management"),
        (name = "categories", description = "Catalog categories (public)"),
        (name = "products", description = "Catalog products (public)"),
        (name = "banners", description = "Home carousel banners (public)"),
        (name = "ready-pcs", description = "Ready-built PCs (public)"),
        (name = "featured", description = "Featured products (public)"),
        (name = "settings", description = "Store contact settings (public)"),
        (name = "checkout", description = "WhatsApp checkout hand-off"),
        (name = "admin", description = "Administrative back office (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Kecinfor Store API",
        version = "0.1.0",
        description = "API documentation for the Kecinfor storefront",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
