//! Similar-product recommendations.
//!
//! Products are compared by cosine similarity of their feature vectors
//! (`[price, ram, storage, rating]`, see [`Product::features`]). The anchor
//! product itself is never recommended.

use cartiq_core::{Product, ProductId};

/// Number of products shown in a recommendation row.
pub const RECOMMENDATION_COUNT: usize = 3;

/// Cosine similarity of two feature vectors.
///
/// Returns 0 when either vector has zero magnitude.
#[must_use]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// The `limit` products most similar to `anchor`, best first.
///
/// Ties keep catalog order. Returns nothing if `anchor` is not in `products`.
#[must_use]
pub fn recommend(products: &[Product], anchor: ProductId, limit: usize) -> Vec<&Product> {
    let Some(anchor_features) = products
        .iter()
        .find(|p| p.id == anchor)
        .map(Product::features)
    else {
        return Vec::new();
    };

    let mut scored: Vec<(&Product, f64)> = products
        .iter()
        .filter(|p| p.id != anchor)
        .map(|p| (p, cosine_similarity(&anchor_features, &p.features())))
        .collect();

    // Stable sort, so equal scores stay in catalog order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .take(limit)
        .map(|(product, _)| product)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone(id: i64, price: i64, ram: f64, storage: f64, rating: f64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Phone {id}"),
            price: price.into(),
            brand: None,
            image: format!("{id}.png"),
            ram: Some(ram),
            storage: Some(storage),
            rating: Some(rating),
        }
    }

    fn ids(products: &[&Product]) -> Vec<i64> {
        products.iter().map(|p| p.id.as_i64()).collect()
    }

    #[test]
    fn test_cosine_identical_vectors() {
        let v = [3.0, 4.0, 0.0, 1.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_zero_vector() {
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_recommend_excludes_anchor_and_limits() {
        let products = vec![
            phone(1, 20000, 8.0, 128.0, 4.5),
            phone(2, 21000, 8.0, 128.0, 4.4),
            phone(3, 90000, 12.0, 512.0, 4.8),
            phone(4, 19000, 6.0, 128.0, 4.1),
            phone(5, 8000, 4.0, 64.0, 3.9),
        ];

        let recs = recommend(&products, ProductId::new(1), RECOMMENDATION_COUNT);

        assert_eq!(recs.len(), 3);
        assert!(recs.iter().all(|p| p.id != ProductId::new(1)));
    }

    #[test]
    fn test_recommend_orders_by_similarity() {
        // Same direction as the anchor scores 1.0; the others point elsewhere
        let anchor = Product {
            price: 0_i64.into(),
            ..phone(1, 0, 1.0, 0.0, 0.0)
        };
        let same = Product {
            price: 0_i64.into(),
            ..phone(2, 0, 2.0, 0.0, 0.0)
        };
        let half = Product {
            price: 0_i64.into(),
            ..phone(3, 0, 1.0, 1.0, 0.0)
        };
        let none = Product {
            price: 0_i64.into(),
            ..phone(4, 0, 0.0, 0.0, 1.0)
        };
        let products = vec![anchor, none, half, same];

        let recs = recommend(&products, ProductId::new(1), 3);
        assert_eq!(ids(&recs), vec![2, 3, 4]);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let products = vec![
            phone(1, 100, 1.0, 1.0, 1.0),
            phone(2, 100, 1.0, 1.0, 1.0),
            phone(3, 100, 1.0, 1.0, 1.0),
        ];
        assert_eq!(ids(&recommend(&products, ProductId::new(2), 3)), vec![1, 3]);
    }

    #[test]
    fn test_unknown_anchor() {
        let products = vec![phone(1, 100, 1.0, 1.0, 1.0)];
        assert!(recommend(&products, ProductId::new(99), 3).is_empty());
    }

    #[test]
    fn test_small_catalog() {
        let products = vec![phone(1, 100, 1.0, 1.0, 1.0), phone(2, 50, 1.0, 1.0, 1.0)];
        assert_eq!(ids(&recommend(&products, ProductId::new(1), 3)), vec![2]);
    }
}
