//! Ingredient classification: a table of known ingredient names first, then
//! keyword rules.

use mixchord_traits::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Keywords that map an ingredient to a category when one of them is a
/// substring of the (lowercased) ingredient name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new(category: Category, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Maps ingredient names to a [`Category`].
///
/// A name found in the named table (compared trimmed and lowercased) gets
/// its category directly. Otherwise rules are always evaluated in [`Category::PRIORITY`] order whatever order
/// they were given in, so "cherry brandy" is alcoholic and never a fruit.
/// A name that matches nothing is [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryClassifier {
    rules: Vec<KeywordRule>,
    named: BTreeMap<String, Category>,
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new(default_rules()).with_named(default_named())
    }
}

impl CategoryClassifier {
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        let mut rules: Vec<KeywordRule> = rules
            .into_iter()
            .map(|rule| KeywordRule {
                category: rule.category,
                keywords: rule
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();
        // stable: rules of the same category keep their relative order
        rules.sort_by_key(|rule| rule.category.rank());
        Self {
            rules,
            named: BTreeMap::new(),
        }
    }

    /// Adds exact-name entries, replacing the category of names already known.
    pub fn with_named<S: AsRef<str>>(
        mut self,
        named: impl IntoIterator<Item = (S, Category)>,
    ) -> Self {
        for (name, category) in named {
            let name = name.as_ref().trim().to_lowercase();
            if !name.is_empty() {
                self.named.insert(name, category);
            }
        }
        self
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn named(&self) -> &BTreeMap<String, Category> {
        &self.named
    }

    pub fn classify(&self, ingredient: &str) -> Category {
        let name = ingredient.to_lowercase();
        if let Some(&category) = self.named.get(name.trim()) {
            return category;
        }
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| name.contains(k.as_str())))
            .map(|rule| rule.category)
            .unwrap_or(Category::Other)
    }
}

/// The stock keyword table.
pub fn default_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(
            Category::Alcoholic,
            &[
                "rum", "vodka", "gin", "whiskey", "whisky", "brandy", "liqueur", "tequila", "wine",
                "beer", "scotch", "bourbon", "schnapps", "vermouth", "cognac", "champagne",
                "mezcal",
            ],
        ),
        KeywordRule::new(
            Category::Nonalcoholic,
            &[
                "juice", "soda", "water", "tea", "coffee", "cola", "punch", "nectar",
            ],
        ),
        KeywordRule::new(
            Category::Mixers,
            &[
                "syrup", "cream", "milk", "cordial", "mix", "sugar", "honey", "grenadine",
            ],
        ),
        KeywordRule::new(
            Category::Spices,
            &[
                "bitters", "salt", "pepper", "nutmeg", "cinnamon", "mint", "rosemary", "thyme",
                "cloves", "cardamom",
            ],
        ),
        KeywordRule::new(
            Category::Fruits,
            &[
                "apple", "orange", "lemon", "lime", "cherry", "berry", "fruit", "mango", "banana",
                "pineapple", "peach", "kiwi",
            ],
        ),
    ]
}

/// Known ingredients of the cocktail database, by category.
const NAMED_INGREDIENTS: &[(Category, &[&str])] = &[
    (
        Category::Alcoholic,
        &[
            // whiskeys
            "blended whiskey", "blended scotch", "bourbon", "crown royal", "irish whiskey",
            "islay single malt scotch", "jack daniels", "jim beam", "johnnie walker",
            "rye whiskey", "tennessee whiskey", "whiskey", "whisky", "wild turkey",
            // rums
            "151 proof rum", "añejo rum", "bacardi limon", "blackstrap rum", "dark rum",
            "gold rum", "light rum", "malibu rum", "spiced rum", "white rum",
            // vodkas
            "absolut vodka", "absolut citron", "absolut kurant", "absolut peppar",
            "cranberry vodka", "lime vodka", "peach vodka", "raspberry vodka", "vanilla vodka",
            // gins
            "gin", "sloe gin",
            // brandies
            "apple brandy", "apricot brandy", "blackberry brandy", "cherry brandy", "cognac",
            "peach brandy",
            // liqueurs
            "advocaat", "amaretto", "amaro montenegro", "aperol", "baileys irish cream",
            "benedictine", "blue curacao", "butterscotch schnapps", "campari",
            "chambord raspberry liqueur", "cherry heering", "cherry liqueur",
            "chocolate liqueur", "coffee brandy", "coffee liqueur", "cointreau",
            "crème de banane", "crème de cacao", "crème de cassis", "crème de mure",
            "drambuie", "elderflower cordial", "frangelico", "galliano", "godiva liqueur",
            "grand marnier", "irish cream", "jägermeister", "kahlua", "kiwi liqueur",
            "maraschino liqueur", "midori melon liqueur", "orange curacao", "passoa",
            "peach schnapps", "peachtree schnapps", "pernod", "pisang ambon", "sambuca",
            "southern comfort", "st. germain", "strawberry liqueur", "strawberry schnapps",
            "tia maria", "triple sec", "vanilla liqueur",
            // other spirits
            "absinthe", "anisette", "apfelkorn", "cachaça", "everclear", "falernum",
            "firewater", "grain alcohol", "mezcal", "ouzo", "pisco", "ricard", "rumple minze",
            "tequila", "yukon jack",
            // wines
            "champagne", "dubonnet rouge", "lillet", "lillet blanc", "port", "prosecco",
            "red wine", "rosso vermouth", "ruby port", "sherry", "vermouth", "white wine",
            "wine",
            // beers
            "beer", "guinness stout", "lager", "cider",
        ],
    ),
    (
        Category::Nonalcoholic,
        &[
            // soft drinks
            "7-up", "bitter lemon", "coca-cola", "dr. pepper", "fresca", "ginger ale",
            "ginger beer", "mountain dew", "pepsi cola", "root beer", "soda water", "sprite",
            "surge", "zima",
            // juices and nectars
            "apple juice", "apricot nectar", "cranberry juice", "grape juice",
            "grapefruit juice", "lemon juice", "lime juice", "orange juice",
            "passion fruit juice", "peach nectar", "pineapple juice", "pomegranate juice",
            "tomato juice",
        ],
    ),
    (
        Category::Mixers,
        &[
            // syrups and sweeteners
            "agave syrup", "chocolate syrup", "corn syrup", "grenadine", "honey", "honey syrup",
            "maple syrup", "mint syrup", "orgeat syrup", "passion fruit syrup",
            "pineapple syrup", "raspberry syrup", "rosemary syrup", "simple syrup",
            "sugar syrup", "vanilla syrup",
            // creams and dairy
            "butter", "condensed milk", "cream", "cream of coconut", "half-and-half",
            "heavy cream", "light cream", "whipped cream", "whipping cream", "yoghurt",
            // other mixers
            "blackcurrant cordial", "coconut syrup", "daiquiri mix", "fruit punch",
            "hot chocolate", "pina colada mix", "sirup of roses", "sour mix",
            "sweet and sour mix",
        ],
    ),
    (
        Category::Spices,
        &[
            // herbs
            "lavender", "mint", "rosemary", "thyme",
            // spices
            "allspice", "black pepper", "cardamom", "cayenne pepper", "cinnamon", "cloves",
            "coriander", "cumin seed", "nutmeg", "pepper", "salt", "vanilla", "vanilla extract",
        ],
    ),
    (
        Category::Fruits,
        &[
            // fresh fruits
            "apple", "banana", "blackberries", "blood orange", "cherries", "cherry", "cucumber",
            "fig", "kiwi", "lemon", "lime", "mango", "olive", "orange", "papaya",
            "passion fruit", "peach", "pineapple", "raspberry", "strawberry", "tomato",
            // peels and zests
            "lemon peel", "lime peel", "orange peel", "orange spiral",
        ],
    ),
    (
        Category::Other,
        &[
            // flavorings and colorings
            "almond flavoring", "caramel coloring", "cocoa powder", "coconut liqueur",
            "demerara sugar", "marshmallows", "oreo cookie", "vanilla ice-cream",
            // botanicals
            "asafoetida", "rose", "wormwood",
            // condiments
            "celery salt", "hot sauce", "olive brine", "worcestershire sauce",
            // essences and extracts
            "roses sweetened lime juice",
            // garnishes
            "maraschino cherry",
            // miscellaneous
            "egg", "egg white", "egg yolk", "ice", "powdered sugar", "red chili flakes",
        ],
    ),
];

/// The stock table of known ingredient names.
pub fn default_named() -> BTreeMap<String, Category> {
    NAMED_INGREDIENTS
        .iter()
        .flat_map(|&(category, names)| names.iter().map(move |name| (name.to_string(), category)))
        .collect()
}
