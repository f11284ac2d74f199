//! Initial catalog, categories and shipping zones.
//!
//! The shop starts from this data on every boot; nothing is persisted
//! across restarts.

use crate::catalog::Catalog;
use crate::shipping::ShippingZones;
use crate::types::{Category, DEFAULT_BALADIYA, Price, Product, ProductId, ShippingZone, ZoneId};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|&v| v.to_owned()).collect()
}

/// Seeded products and the category reference list.
#[must_use]
pub fn catalog() -> Catalog {
    let products = vec![
        Product {
            id: ProductId::new("1"),
            name: "ساعة ذكية ألترا برو".to_owned(),
            price: Price::from_units(4500),
            category: "إلكترونيات".to_owned(),
            description: "ساعة ذكية بشاشة عالية الدقة، مقاومة للماء، وبطارية تدوم طويلاً."
                .to_owned(),
            image: "https://picsum.photos/id/175/300/400".to_owned(),
            sizes: Vec::new(),
            colors: strings(&["أسود", "برتقالي", "رمادي"]),
            stock: 20,
        },
        Product {
            id: ProductId::new("2"),
            name: "حذاء رياضي مريح".to_owned(),
            price: Price::from_units(3200),
            category: "ملابس".to_owned(),
            description: "حذاء رياضي خفيف الوزن ومناسب للجري والاستخدام اليومي.".to_owned(),
            image: "https://picsum.photos/id/21/300/400".to_owned(),
            sizes: strings(&["39", "40", "41", "42", "43", "44"]),
            colors: strings(&["أبيض", "أسود"]),
            stock: 15,
        },
        Product {
            id: ProductId::new("3"),
            name: "عطر فاخر للرجال".to_owned(),
            price: Price::from_units(2800),
            category: "عطور".to_owned(),
            description: "عطر برائحة خشبية ثابتة تدوم طوال اليوم.".to_owned(),
            image: "https://picsum.photos/id/312/300/400".to_owned(),
            sizes: strings(&["50ml", "100ml"]),
            colors: Vec::new(),
            stock: 50,
        },
        Product {
            id: ProductId::new("4"),
            name: "حقيبة جلدية للأعمال".to_owned(),
            price: Price::from_units(5600),
            category: "إكسسوارات".to_owned(),
            description: "حقيبة من الجلد الطبيعي تتسع لحاسوب محمول ومستندات العمل.".to_owned(),
            image: "https://picsum.photos/id/36/300/400".to_owned(),
            sizes: Vec::new(),
            colors: strings(&["بني", "أسود"]),
            stock: 5,
        },
    ];

    let categories = vec![
        Category::new("1", "إلكترونيات"),
        Category::new("2", "ملابس"),
        Category::new("3", "عطور"),
        Category::new("4", "إكسسوارات"),
        Category::new("5", "منزل"),
        Category::new("6", "عام"),
    ];

    Catalog::new(products, categories)
}

/// Seeded shipping zones, one per region.
#[must_use]
pub fn shipping_zones() -> ShippingZones {
    let zone = |id: &str, wilaya: &str, price: i64| ShippingZone {
        id: ZoneId::new(id),
        wilaya: wilaya.to_owned(),
        baladiya: DEFAULT_BALADIYA.to_owned(),
        price: Price::from_units(price),
    };

    ShippingZones::new(vec![
        zone("1", "الجزائر", 400),
        zone("2", "وهران", 600),
        zone("3", "قسنطينة", 600),
        zone("4", "الجنوب", 900),
    ])
}
