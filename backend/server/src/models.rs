use serde::{Deserialize, Serialize};

/// Ingredients as submitted: free text from the upload form, or a list when a client sends one on update.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Ingredients {
    Text(String),
    List(Vec<String>),
}

impl Ingredients {
    /// Text searched by `q`. List entries are joined with single spaces.
    pub fn joined(&self) -> String {
        match self {
            Ingredients::Text(text) => text.clone(),
            Ingredients::List(items) => items.join(" "),
        }
    }
}

impl Default for Ingredients {
    fn default() -> Self {
        Ingredients::Text(String::new())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Recipe {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ingredients: Ingredients,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_image: Option<String>,
}

/// Replacement body for `PUT`. Any `id` in the body is ignored, whatever its type.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RecipeUpdate {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ingredients: Ingredients,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub original_image: Option<String>,
}

impl RecipeUpdate {
    pub fn into_recipe(self, id: u64) -> Recipe {
        Recipe {
            id,
            title: self.title,
            ingredients: self.ingredients,
            instructions: self.instructions,
            category: self.category,
            image: self.image,
            original_image: self.original_image,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_ingredients_keep_shape() {
        let text: Recipe = serde_json::from_value(json!({ "id": 1, "ingredients": "salt, eggs" })).unwrap();
        assert_eq!(text.ingredients, Ingredients::Text("salt, eggs".to_string()));

        let list: Recipe = serde_json::from_value(json!({ "id": 2, "ingredients": ["salt", "eggs"] })).unwrap();
        assert_eq!(list.ingredients.joined(), "salt eggs");
        assert_eq!(serde_json::to_value(&list).unwrap()["ingredients"], json!(["salt", "eggs"]));
    }

    #[test]
    fn test_missing_image_is_omitted() {
        let recipe = Recipe {
            id: 3,
            title: "Toast".to_string(),
            ..Recipe::default()
        };
        let value = serde_json::to_value(&recipe).unwrap();
        assert!(value.get("image").is_none());
        assert!(value.get("original_image").is_none());
        assert_eq!(value["title"], "Toast");
    }

    #[test]
    fn test_update_ignores_any_body_id() {
        for id in [json!("1"), json!(null), json!(-3), json!(1.5), json!({ "nested": true })] {
            let update: RecipeUpdate = serde_json::from_value(json!({ "id": id, "title": "Stew" })).unwrap();
            let recipe = update.into_recipe(4);
            assert_eq!(recipe.id, 4);
            assert_eq!(recipe.title, "Stew");
        }
    }

    #[test]
    fn test_omitted_fields_default_empty() {
        let recipe: Recipe = serde_json::from_value(json!({ "title": "Soup" })).unwrap();
        assert_eq!(recipe.id, 0);
        assert_eq!(recipe.category, "");
        assert_eq!(recipe.ingredients.joined(), "");
    }
}
