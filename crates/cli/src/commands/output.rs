//! Terminal output.
//!
//! All user-facing printing goes through here. Diagnostics and store
//! notifications go to the log stream instead.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use vmart_storefront::models::{CartLineItem, Category, OrderTotals, Product, User};
use vmart_storefront::services::CompletedOrder;

pub fn line(text: &str) {
    println!("{text}");
}

pub fn failure(message: &str) {
    eprintln!("error: {message}");
}

pub fn products(products: &[Product]) {
    if products.is_empty() {
        println!("No products found.");
        return;
    }
    for product in products {
        let sale = product
            .original_price
            .map(|original| format!(" (was {original})"))
            .unwrap_or_default();
        let stock = if product.in_stock() {
            format!("{} in stock", product.stock)
        } else {
            "out of stock".to_string()
        };
        println!(
            "{:<10} {:<42} {:>9}{sale}  {:.1}★ ({})  {stock}",
            product.id, product.name, product.price, product.rating, product.review_count
        );
    }
}

pub fn product(product: &Product) {
    println!("{} [{}]", product.name, product.id);
    println!("  {}", product.description);
    match product.original_price {
        Some(original) => println!(
            "  Price: {} (was {original}, {}% off)",
            product.price,
            product.discount.unwrap_or_default()
        ),
        None => println!("  Price: {}", product.price),
    }
    match &product.sub_category {
        Some(sub) => println!("  Category: {} / {sub}", product.category),
        None => println!("  Category: {}", product.category),
    }
    println!(
        "  Rating: {:.1} ({} reviews)",
        product.rating, product.review_count
    );
    println!("  Stock: {}", product.stock);
}

pub fn categories(categories: &[Category]) {
    for category in categories {
        println!(
            "{:<12} {:<20} {} products",
            category.id, category.name, category.product_count
        );
    }
}

pub fn cart(items: &[CartLineItem], count: u64, total: vmart_core::Price) {
    if items.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for item in items {
        println!(
            "{:<10} {:<42} {:>3} × {:>9} = {:>10}",
            item.product_id,
            item.name,
            item.quantity,
            item.unit_price,
            item.line_total()
        );
    }
    println!("{count} item(s), total {total}");
}

pub fn totals(totals: &OrderTotals) {
    println!("Subtotal: {:>10}", totals.subtotal);
    if totals.free_shipping() {
        println!("Shipping: {:>10}", "Free");
    } else {
        println!("Shipping: {:>10}", totals.shipping);
    }
    println!("Tax:      {:>10}", totals.tax);
    println!("Total:    {:>10}", totals.total);
}

pub fn user(user: Option<&User>) {
    match user {
        Some(user) => println!("{} <{}> ({}) [{}]", user.name, user.email, user.role, user.id),
        None => println!("Not logged in."),
    }
}

pub fn order(order: &CompletedOrder) {
    println!("Order confirmed: {}", order.reference);
    println!(
        "{} item(s), {} shipping, paid by {}",
        order.item_count, order.shipping_method, order.payment_method
    );
    let address = &order.shipping_address;
    println!(
        "Shipping to {}, {}, {}, {} {}, {}",
        address.full_name,
        address.address,
        address.city,
        address.state,
        address.postal_code,
        address.country
    );
    totals(&order.totals);
}
