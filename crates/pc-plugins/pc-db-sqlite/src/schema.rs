//! Table definitions, applied at startup with `CREATE TABLE IF NOT EXISTS`.

pub(crate) const CREATE_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS ingredients (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        VARCHAR(100) NOT NULL UNIQUE,
        category    VARCHAR(50)  NOT NULL,
        unit        VARCHAR(20)  NOT NULL,
        created_at  TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS recipes (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        title         VARCHAR(200) NOT NULL,
        description   TEXT,
        instructions  TEXT NOT NULL,
        cooking_time  INTEGER CHECK (cooking_time IS NULL OR cooking_time > 0),
        difficulty    TEXT NOT NULL DEFAULT 'medium'
                      CHECK (difficulty IN ('easy', 'medium', 'hard')),
        servings      INTEGER NOT NULL DEFAULT 1 CHECK (servings > 0),
        image_url     VARCHAR(500),
        created_at    TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS recipe_ingredients (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        recipe_id      INTEGER NOT NULL REFERENCES recipes(id),
        ingredient_id  INTEGER NOT NULL REFERENCES ingredients(id),
        quantity       REAL NOT NULL CHECK (quantity > 0),
        unit           VARCHAR(20) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS ratings (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        recipe_id   INTEGER NOT NULL REFERENCES recipes(id),
        rating      INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
        comment     TEXT,
        created_at  TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_recipe ON recipe_ingredients (recipe_id)",
    "CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_ingredient ON recipe_ingredients (ingredient_id)",
    "CREATE INDEX IF NOT EXISTS idx_ratings_recipe ON ratings (recipe_id)",
];
