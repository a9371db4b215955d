/// Column names a dataset is expected to provide, in canonical order.
pub const DATASET_COLUMNS: [&str; 8] = [
    "name",
    "gender",
    "country",
    "occupation",
    "birth_date",
    "death_date",
    "image_url",
    "description",
];

/// Maximum description length shown on a person card.
pub const CARD_DESCRIPTION_CHARS: usize = 300;
