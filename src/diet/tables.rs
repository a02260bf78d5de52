// Lower-case ingredient keywords excluded by each diet.

pub(super) const VEGAN: &[&str] = &[
    "chicken", "beef", "pork", "lamb", "mutton", "veal", "turkey", "duck", "goose", "bacon",
    "ham", "sausage", "salami", "pepperoni", "prosciutto", "chorizo", "venison", "rabbit",
    "fish", "salmon", "tuna", "cod", "trout", "sardine", "anchovy", "anchovies", "mackerel",
    "shrimp", "prawn", "prawns", "crab", "lobster", "clam", "clams", "mussel", "mussels",
    "oyster", "oysters", "scallop", "scallops", "squid", "octopus", "milk", "cheese",
    "butter", "cream", "yogurt", "yoghurt", "ghee", "whey", "egg", "eggs", "honey",
    "gelatin", "gelatine", "lard",
];

pub(super) const VEGETARIAN: &[&str] = &[
    "chicken", "beef", "pork", "lamb", "mutton", "veal", "turkey", "duck", "goose", "bacon",
    "ham", "sausage", "salami", "pepperoni", "prosciutto", "chorizo", "venison", "rabbit",
    "fish", "salmon", "tuna", "cod", "trout", "sardine", "anchovy", "anchovies", "mackerel",
    "shrimp", "prawn", "prawns", "crab", "lobster", "clam", "clams", "mussel", "mussels",
    "oyster", "oysters", "scallop", "scallops", "squid", "octopus", "gelatin", "gelatine",
    "lard",
];

pub(super) const PESCO_VEGETARIAN: &[&str] = &[
    "chicken", "beef", "pork", "lamb", "mutton", "veal", "turkey", "duck", "goose", "bacon",
    "ham", "sausage", "salami", "pepperoni", "prosciutto", "chorizo", "venison", "rabbit",
    "gelatin", "gelatine", "lard",
];

pub(super) const GLUTEN: &[&str] = &[
    "wheat", "flour", "bread", "breadcrumbs", "pasta", "spaghetti", "noodles", "barley", "rye",
    "couscous", "semolina", "bulgur", "seitan", "spelt", "farro", "malt",
];

pub(super) const DAIRY: &[&str] = &[
    "milk", "cheese", "butter", "cream", "yogurt", "yoghurt", "ghee", "whey", "casein",
    "buttermilk", "mozzarella", "parmesan", "cheddar", "ricotta",
];

pub(super) const NUTS: &[&str] = &[
    "peanut", "peanuts", "peanut butter", "almond", "almonds", "cashew", "cashews", "walnut",
    "walnuts", "pecan", "pecans", "hazelnut", "hazelnuts", "pistachio", "pistachios",
    "macadamia", "pine nuts",
];

pub(super) const SOY: &[&str] = &[
    "soy", "soya", "soybean", "soybeans", "tofu", "tempeh", "edamame", "miso", "soy sauce",
    "tamari",
];

pub(super) const EGG: &[&str] = &["egg", "eggs", "egg white", "egg yolk", "mayonnaise", "meringue"];

pub(super) const HALAL: &[&str] = &[
    "pork", "bacon", "ham", "lard", "salami", "pepperoni", "prosciutto", "chorizo", "gelatin",
    "gelatine", "wine", "beer", "rum", "brandy", "whisky", "vodka",
];
