/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// SECTOR CONSTANTS
// =============================================================================

/// Retail sector value stored on profiles
pub const SECTOR_VAREJO: &str = "varejo";

/// Wholesale (reseller) sector value stored on profiles
pub const SECTOR_REVENDA: &str = "revenda";

// =============================================================================
// STORE CONTACT FALLBACKS
// =============================================================================
// Used when no store_settings row has been created yet. These match the
// numbers the storefront shipped with before settings became editable.

/// Retail WhatsApp number (country code + area code + number, digits only)
pub const DEFAULT_WHATSAPP_VAREJO: &str = "558534833373";

/// Wholesale WhatsApp number
pub const DEFAULT_WHATSAPP_REVENDA: &str = "558589070724";
