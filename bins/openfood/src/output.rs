//! Terminal output utilities
//!
//! Provides consistent formatting for product cards, the detail view and
//! the cart.

use openfood_api_client::{Category, Nutriments, NutritionGrade, Product};
use openfood_explorer::Cart;
use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print a subheader
    pub fn subheader(message: &str) {
        println!();
        println!("{}", message.bold().dimmed());
    }
}

/// Nutri-Score badge colors
pub fn grade_rgb(grade: NutritionGrade) -> (u8, u8, u8) {
    match grade {
        NutritionGrade::A => (3, 129, 65),
        NutritionGrade::B => (133, 187, 47),
        NutritionGrade::C => (254, 203, 2),
        NutritionGrade::D => (238, 129, 0),
        NutritionGrade::E => (230, 62, 17),
    }
}

/// Colored grade badge, or a dim placeholder
pub fn grade_badge(grade: Option<NutritionGrade>) -> String {
    match grade {
        Some(grade) => {
            let (r, g, b) = grade_rgb(grade);
            format!(" {} ", grade.letter())
                .black()
                .bold()
                .on_truecolor(r, g, b)
                .to_string()
        }
        None => " ? ".dimmed().to_string(),
    }
}

/// One result card: name and grade, then brand and the first two categories
pub fn product_card(position: usize, product: &Product) -> String {
    let mut card = format!(
        "{:>3}. {} {}",
        position,
        product.display_name().bold(),
        grade_badge(product.nutrition_grade())
    );

    let mut meta = Vec::new();
    if let Some(brand) = product.primary_brand() {
        meta.push(brand.to_string());
    }
    if let Some(categories) = product.headline_categories(2) {
        meta.push(categories);
    }
    if !meta.is_empty() {
        card.push_str(&format!("\n     {}", meta.join(" · ").dimmed()));
    }
    if !product.code.is_empty() {
        card.push_str(&format!("\n     {}", product.code.cyan()));
    }
    card
}

/// Print a list of cards, numbered from 1
pub fn print_cards<'a>(products: impl IntoIterator<Item = &'a Product>) {
    for (i, product) in products.into_iter().enumerate() {
        println!("{}", product_card(i + 1, product));
    }
}

/// Print the full product view
pub fn print_product(product: &Product) {
    Status::header(product.display_name());

    field("Barcode", Some(product.code.as_str()));
    field("Brand", product.primary_brand());
    field("Quantity", product.quantity.as_deref());
    println!("  {:<12} {}", "Grade".dimmed(), grade_badge(product.nutrition_grade()));
    let categories = product.category_list().join(", ");
    field("Categories", Some(categories.as_str()));
    field("Image", product.image());

    Status::subheader("Labels");
    let labels = product.label_list();
    if labels.is_empty() {
        println!("  {}", "No labels available".dimmed());
    } else {
        println!("  {}", labels.join(", "));
    }

    Status::subheader("Ingredients");
    println!("  {}", product.ingredients().unwrap_or("Not provided"));

    if let Some(allergens) = product.allergens.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
        Status::subheader("Allergens");
        println!("  {}", allergens.yellow());
    }

    Status::subheader("Nutrition facts (per 100 g)");
    let rows = nutrition_rows(&product.nutriments);
    if rows.is_empty() {
        println!("  {}", "No nutrition data".dimmed());
    }
    for (label, amount) in rows {
        println!("  {:<24} {:>10}", label, amount);
    }
}

fn field(label: &str, value: Option<&str>) {
    let value = value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or("-");
    println!("  {:<12} {}", label.dimmed(), value);
}

/// Known nutrients in display order, then any other numeric keys by name
pub fn nutrition_rows(nutriments: &Nutriments) -> Vec<(String, String)> {
    nutriments
        .known()
        .map(|(label, amount)| (label.to_string(), format_amount(amount)))
        .chain(
            nutriments
                .extra()
                .map(|(key, amount)| (humanize_key(key), format_amount(amount))),
        )
        .collect()
}

/// Format an amount with at most two decimals, dropping trailing zeros
pub fn format_amount(amount: f64) -> String {
    let formatted = format!("{amount:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn humanize_key(key: &str) -> String {
    let spaced = key.replace(['-', '_'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

/// Print a category row
pub fn print_category(category: &Category) {
    println!(
        "  {:<40} {:>9}  {}",
        category.display_name(),
        category.products,
        category.id.dimmed()
    );
}

/// Print the cart contents
pub fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        Status::info("Cart is empty");
        return;
    }
    Status::header(&format!(
        "Cart ({})",
        format_count(cart.total_quantity() as usize, "item", "items")
    ));
    for line in cart.items() {
        println!("  {:>3} × {}  {}", line.quantity, line.name, line.id.dimmed());
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(12.0), "12");
        assert_eq!(format_amount(3.5), "3.5");
        assert_eq!(format_amount(0.126), "0.13");
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn test_nutrition_rows_order() {
        let nutriments: Nutriments = [
            ("zinc".to_string(), 0.004),
            ("fat".to_string(), 3.6),
            ("energy".to_string(), 272.0),
            ("fat_100g".to_string(), 3.6),
            ("vitamin-d".to_string(), 0.00001),
        ]
        .into_iter()
        .collect();

        let rows = nutrition_rows(&nutriments);
        let labels: Vec<&str> = rows.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Energy (kJ)", "Fat", "Vitamin d", "Zinc"]);
        assert_eq!(rows[0].1, "272");
    }

    #[test]
    fn test_product_card_meta() {
        let product = Product {
            code: "3017620422003".to_string(),
            product_name: Some("Nutella".to_string()),
            brands: Some("Ferrero, Nutella".to_string()),
            categories: Some("Spreads, Sweet spreads, Hazelnut spreads".to_string()),
            nutrition_grades: Some("e".to_string()),
            ..Product::default()
        };
        let card = product_card(1, &product);
        assert!(card.contains("Nutella"));
        assert!(card.contains("Ferrero"));
        assert!(card.contains("Spreads, Sweet spreads"));
        assert!(!card.contains("Hazelnut"));
        assert!(card.contains("3017620422003"));
    }

    #[test]
    fn test_grade_badge_placeholder() {
        assert!(grade_badge(None).contains('?'));
        assert!(grade_badge(Some(NutritionGrade::A)).contains('A'));
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "item", "items"), "1 item");
        assert_eq!(format_count(3, "item", "items"), "3 items");
    }
}
