//! Static demo catalog.

use vmart_core::{CategoryId, Price, ProductId};

use crate::models::{Category, Product};

const IMAGE_BASE: &str = "https://images.unsplash.com";

fn image(photo: &str) -> String {
    format!("{IMAGE_BASE}/{photo}?auto=format&fit=crop&q=80&w=1050")
}

fn category(id: &str, name: &str, photo: &str, product_count: u32) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_owned(),
        image: image(photo),
        product_count,
    }
}

/// Fields every product has; optional merchandising flags are set afterwards.
struct Seed<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    price_cents: i64,
    photos: [&'a str; 2],
    category: &'a str,
    sub_category: &'a str,
    rating: f32,
    review_count: u32,
    stock: u32,
}

impl Seed<'_> {
    fn build(self) -> Product {
        Product {
            id: ProductId::new(self.id),
            name: self.name.to_owned(),
            description: self.description.to_owned(),
            price: Price::from_cents(self.price_cents),
            original_price: None,
            images: self.photos.iter().map(|p| image(p)).collect(),
            category: CategoryId::new(self.category),
            sub_category: Some(self.sub_category.to_owned()),
            rating: self.rating,
            review_count: self.review_count,
            stock: self.stock,
            featured: false,
            new: false,
            discount: None,
        }
    }
}

fn on_sale(mut product: Product, original_cents: i64, discount: u8) -> Product {
    product.original_price = Some(Price::from_cents(original_cents));
    product.discount = Some(discount);
    product
}

const fn featured(mut product: Product) -> Product {
    product.featured = true;
    product
}

const fn new_arrival(mut product: Product) -> Product {
    product.new = true;
    product
}

pub(super) fn categories() -> Vec<Category> {
    vec![
        category("electronics", "Electronics", "photo-1488590528505-98d2b5aba04b", 120),
        category("fashion", "Fashion", "photo-1483985988355-763728e1935b", 250),
        category("home", "Home & Kitchen", "photo-1556911220-e15b29be8c8f", 95),
        category("beauty", "Beauty", "photo-1596462502278-27bfdc403348", 78),
        category("toys", "Toys & Games", "photo-1609372332255-611485350f25", 65),
        category("books", "Books", "photo-1495446815901-a7297e633e8d", 110),
    ]
}

#[allow(clippy::too_many_lines)]
pub(super) fn products() -> Vec<Product> {
    vec![
        featured(on_sale(
            Seed {
                id: "product-1",
                name: "Smart HD TV 43\"",
                description: "A stunning 43-inch Smart HD TV with built-in streaming apps, voice control, and crystal clear display. Perfect for your living room entertainment.",
                price_cents: 39_999,
                photos: [
                    "photo-1593784991095-a205069470b6",
                    "photo-1593305841991-05c297ba4575",
                ],
                category: "electronics",
                sub_category: "televisions",
                rating: 4.5,
                review_count: 128,
                stock: 25,
            }
            .build(),
            49_999,
            20,
        )),
        featured(on_sale(
            Seed {
                id: "product-2",
                name: "Wireless Noise-Cancelling Headphones",
                description: "Premium wireless headphones with active noise cancellation, 30-hour battery life, and comfortable ear cushions for all-day listening.",
                price_cents: 14_999,
                photos: [
                    "photo-1505740420928-5e560c06d30e",
                    "photo-1487215078519-e21cc028cb29",
                ],
                category: "electronics",
                sub_category: "audio",
                rating: 4.8,
                review_count: 256,
                stock: 42,
            }
            .build(),
            19_999,
            25,
        )),
        new_arrival(
            Seed {
                id: "product-3",
                name: "Smartphone Pro Max",
                description: "Latest flagship smartphone with 6.7-inch OLED display, triple camera system, all-day battery life, and the fastest processor available.",
                price_cents: 99_999,
                photos: [
                    "photo-1605236453806-6ff36851218e",
                    "photo-1511707171634-5f897ff02ff9",
                ],
                category: "electronics",
                sub_category: "phones",
                rating: 4.9,
                review_count: 512,
                stock: 18,
            }
            .build(),
        ),
        on_sale(
            Seed {
                id: "product-4",
                name: "Casual Men's T-Shirt",
                description: "Comfortable, breathable cotton t-shirt perfect for everyday wear. Available in multiple colors and sizes.",
                price_cents: 1_999,
                photos: [
                    "photo-1521572163474-6864f9cf17ab",
                    "photo-1562157873-818bc0726f68",
                ],
                category: "fashion",
                sub_category: "men",
                rating: 4.3,
                review_count: 89,
                stock: 150,
            }
            .build(),
            2_499,
            20,
        ),
        featured(
            Seed {
                id: "product-5",
                name: "Women's Summer Dress",
                description: "Elegant summer dress with floral pattern, perfect for beach days and casual outings. Light and comfortable material.",
                price_cents: 3_999,
                photos: [
                    "photo-1539008835657-9e8e9680c956",
                    "photo-1515372039744-b8f02a3ae446",
                ],
                category: "fashion",
                sub_category: "women",
                rating: 4.7,
                review_count: 136,
                stock: 85,
            }
            .build(),
        ),
        on_sale(
            Seed {
                id: "product-6",
                name: "Coffee Maker Deluxe",
                description: "Programmable coffee maker with 12-cup capacity, built-in grinder, and multiple brewing options for the perfect cup every time.",
                price_cents: 8_999,
                photos: [
                    "photo-1517668808822-9ebb02f2a0e6",
                    "photo-1576300292702-bb2ba4118010",
                ],
                category: "home",
                sub_category: "kitchen",
                rating: 4.6,
                review_count: 211,
                stock: 32,
            }
            .build(),
            11_999,
            25,
        ),
        new_arrival(
            Seed {
                id: "product-7",
                name: "Luxury Bedding Set",
                description: "Premium cotton bedding set including duvet cover, fitted sheet, and four pillowcases. Soft, breathable, and perfect for a good night's sleep.",
                price_cents: 12_999,
                photos: [
                    "photo-1584100936595-c0654b55a2e2",
                    "photo-1600210492486-724fe5c67fb0",
                ],
                category: "home",
                sub_category: "bedroom",
                rating: 4.8,
                review_count: 75,
                stock: 22,
            }
            .build(),
        ),
        featured(on_sale(
            Seed {
                id: "product-8",
                name: "Skincare Gift Set",
                description: "Complete skincare routine in one box. Includes cleanser, toner, moisturizer, serum, and face mask made with natural ingredients.",
                price_cents: 6_999,
                photos: [
                    "photo-1570194065650-d99fb4bedf8d",
                    "photo-1571781418606-d638585d7288",
                ],
                category: "beauty",
                sub_category: "skincare",
                rating: 4.9,
                review_count: 168,
                stock: 45,
            }
            .build(),
            8_999,
            22,
        )),
    ]
}
