use serde::{Deserialize, Serialize};

/// Garment family a model or design belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Jersey,
    Sock,
}

/// A 3D garment model in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: String,
    pub name: String,
    /// Mesh asset path
    pub path: String,
    pub product_type: ProductType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_design_id: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// A base design: an SVG template with colorable regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseDesign {
    pub id: String,
    pub name: String,
    /// SVG asset path
    pub path: String,
    pub product_type: ProductType,
    /// Model this design was authored for
    pub model_id: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub is_default: bool,
}

/// Static catalog of models and designs consumed at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub models: Vec<Model>,
    pub designs: Vec<BaseDesign>,
}

impl Catalog {
    pub fn new(models: Vec<Model>, designs: Vec<BaseDesign>) -> Self {
        Self { models, designs }
    }

    pub fn model(&self, id: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.id == id)
    }

    pub fn model_by_path(&self, path: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.path == path)
    }

    pub fn design(&self, id: &str) -> Option<&BaseDesign> {
        self.designs.iter().find(|d| d.id == id)
    }

    /// Default model for a product type, falling back to the first of that type
    pub fn default_model(&self, product_type: ProductType) -> Option<&Model> {
        let mut of_type = self.models.iter().filter(|m| m.product_type == product_type);
        let first = of_type.clone().next();
        of_type.find(|m| m.is_default).or(first)
    }

    /// Default design for a product type, falling back to the first of that type
    pub fn default_design(&self, product_type: ProductType) -> Option<&BaseDesign> {
        let mut of_type = self.designs.iter().filter(|d| d.product_type == product_type);
        let first = of_type.clone().next();
        of_type.find(|d| d.is_default).or(first)
    }

    pub fn designs_for(&self, product_type: ProductType) -> impl Iterator<Item = &BaseDesign> {
        self.designs.iter().filter(move |d| d.product_type == product_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(
            vec![
                Model {
                    id: "jersey_1".into(),
                    name: "Jersey".into(),
                    path: "/models/jersey_1.obj".into(),
                    product_type: ProductType::Jersey,
                    default_design_id: None,
                    is_default: false,
                },
                Model {
                    id: "jersey_2".into(),
                    name: "Jersey V".into(),
                    path: "/models/jersey_2.obj".into(),
                    product_type: ProductType::Jersey,
                    default_design_id: None,
                    is_default: true,
                },
            ],
            vec![BaseDesign {
                id: "sock-lines".into(),
                name: "Lines".into(),
                path: "/designs/sock-lines.svg".into(),
                product_type: ProductType::Sock,
                model_id: "socks_1".into(),
                price: 12.5,
                is_default: false,
            }],
        )
    }

    #[test]
    fn test_default_model_prefers_flag() {
        let catalog = sample();
        assert_eq!(catalog.default_model(ProductType::Jersey).unwrap().id, "jersey_2");
        assert!(catalog.default_model(ProductType::Sock).is_none());
    }

    #[test]
    fn test_default_design_falls_back_to_first() {
        let catalog = sample();
        assert_eq!(catalog.default_design(ProductType::Sock).unwrap().id, "sock-lines");
    }

    #[test]
    fn test_design_wire_format() {
        let json = serde_json::to_value(&sample().designs[0]).unwrap();
        assert_eq!(json["productType"], "sock");
        assert_eq!(json["modelId"], "socks_1");
    }
}
