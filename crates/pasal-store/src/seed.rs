//! Demo catalog shown before the shop owner adds real products.

use chrono::{DateTime, Utc};
use pasal_core::{Category, Money, NewProduct, Product};

struct DemoProduct {
    id: &'static str,
    name: &'static str,
    name_en: &'static str,
    price: i64,
    original_price: i64,
    description: &'static str,
    category: Category,
    stock: u32,
    weight: Option<&'static str>,
}

const DEMO_PRODUCTS: [DemoProduct; 6] = [
    DemoProduct {
        id: "demo-1",
        name: "बासमती चामल",
        name_en: "Basmati Rice",
        price: 180,
        original_price: 200,
        description: "उच्च गुणस्तरको बासमती चामल - १ केजी। खुसबुदार र स्वादिष्ट।",
        category: Category::Grocery,
        stock: 50,
        weight: Some("1kg"),
    },
    DemoProduct {
        id: "demo-2",
        name: "हिमालयन फेस क्रीम",
        name_en: "Himalayan Face Cream",
        price: 450,
        original_price: 500,
        description: "प्राकृतिक जडिबुटीले बनेको फेस क्रीम। सबै प्रकारको छालाको लागि उपयुक्त।",
        category: Category::Cosmetics,
        stock: 20,
        weight: None,
    },
    DemoProduct {
        id: "demo-3",
        name: "दाल भात मसला",
        name_en: "Dal Bhat Masala",
        price: 85,
        original_price: 95,
        description: "नेपाली खानाको लागि विशेष मसला। घरेलु स्वादको लागि उत्तम।",
        category: Category::Grocery,
        stock: 40,
        weight: None,
    },
    DemoProduct {
        id: "demo-4",
        name: "आयुर्वेदिक शैम्पू",
        name_en: "Ayurvedic Shampoo",
        price: 320,
        original_price: 380,
        description: "बालको स्वास्थ्यको लागि आयुर्वेदिक शैम्पू। प्राकृतिक सामग्रीले भरपूर।",
        category: Category::Cosmetics,
        stock: 15,
        weight: None,
    },
    DemoProduct {
        id: "demo-5",
        name: "चिया पत्ती",
        name_en: "Tea Leaves",
        price: 120,
        original_price: 140,
        description: "इलामको उच्च गुणस्तरको चिया पत्ती। ताजा र सुगन्धित।",
        category: Category::Grocery,
        stock: 30,
        weight: None,
    },
    DemoProduct {
        id: "demo-6",
        name: "नेपाली साबुन",
        name_en: "Nepali Soap",
        price: 45,
        original_price: 55,
        description: "प्राकृतिक सामग्रीले बनेको साबुन। छालाको लागि सुरक्षित।",
        category: Category::DailyEssentials,
        stock: 0,
        weight: None,
    },
];

/// The six demo products, ids `demo-1` to `demo-6`. Nepali Soap is out of stock.
pub fn demo_catalog(now: DateTime<Utc>) -> Vec<Product> {
    DEMO_PRODUCTS
        .iter()
        .map(|d| {
            Product::from_new(
                d.id,
                NewProduct {
                    name: d.name.to_string(),
                    name_en: d.name_en.to_string(),
                    price: Money::from_rupees(d.price),
                    original_price: Some(Money::from_rupees(d.original_price)),
                    image: None,
                    description: d.description.to_string(),
                    category: d.category,
                    in_stock: d.stock > 0,
                    stock: d.stock,
                    weight: d.weight.map(str::to_string),
                    brand: None,
                },
                now,
            )
        })
        .collect()
}
