/// Bouquet lifecycle, composition and total price maintenance
pub mod bouquet;
/// Reference data seeding and JSON catalog import
pub mod catalog_import;
/// Flower and accessory components
pub mod component;
/// Callback requests
pub mod consultation;
/// Occasion tags on bouquets
pub mod event;
/// Payment and staff notification payloads
pub mod handoff;
/// Order placement
pub mod order;
/// Price brackets for the quiz
pub mod price_bracket;
/// Money arithmetic and input validation
pub mod pricing;
/// Quiz session and bouquet filtering
pub mod recommendation;
