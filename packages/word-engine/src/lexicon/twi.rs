//! Built-in curated Twi (Akan) vocabulary.
//!
//! Rows are `(term, pronunciation, definition)`. Order within a tier is
//! significant: it is the index space the selection tracker works over.

pub(crate) const EASY: &[(&str, &str, &str)] = &[
    // Pronouns and basic words
    ("Me", "meh", "I / Me"),
    ("Wo", "woh", "You (singular)"),
    ("Ɔ", "aw", "He / She / It"),
    ("Yɛ", "yeh", "We"),
    ("Mo", "moh", "They"),
    ("Wɔn", "wohn", "Their"),
    // Basic verbs
    ("De", "deh", "Is / Are"),
    ("Se", "seh", "Say / Tell"),
    ("So", "soh", "Go"),
    ("Pa", "pah", "Hide / Put"),
    ("Ha", "hah", "Take"),
    ("Tutu", "too-too", "Sit"),
    // Basic nouns
    ("Bi", "bee", "One / A"),
    ("Ho", "hoh", "There / That place"),
    ("No", "noh", "The / That"),
    ("Ade", "ah-deh", "Thing"),
    ("Din", "din", "Name"),
    ("Aburow", "ah-boo-roh", "Husband"),
];

pub(crate) const INTERMEDIATE: &[(&str, &str, &str)] = &[
    // Common verbs
    ("Kɔ", "kaw", "Go"),
    ("Nom", "nohm", "Eat"),
    ("Nom nsa", "nohm n-sah", "Drink water"),
    ("Odɔ", "oh-daw", "Love"),
    ("Ani", "ah-nee", "Come"),
    ("Dua", "doo-ah", "Sleep"),
    ("Kɔm", "kawm", "Hold / Keep"),
    ("Pem", "pem", "Push"),
    ("Tsi", "tsee", "Buy"),
    ("Soa", "soh-ah", "Pull"),
    ("Gyina", "jin-ah", "Stand"),
    ("Fata", "fah-tah", "Finish / End"),
    // Common nouns
    ("Ɔbarima", "aw-bah-ree-mah", "Man"),
    ("Obaa", "oh-bah", "Woman/Girl"),
    ("Abofra", "ah-boh-frah", "Child"),
    ("Kooko", "koh-oh-koh", "Grandmother"),
    ("Ɔpa", "aw-pah", "Grandfather"),
    ("Nsa", "n-sah", "Water"),
    ("Ɛnam", "eh-nahm", "Meat"),
    ("Aduane", "ah-doo-ah-neh", "Food"),
    ("Aban", "ah-bahn", "House"),
    ("Papa", "pah-pah", "Father"),
    ("Maame", "mah-meh", "Mother"),
];

pub(crate) const DIFFICULT: &[(&str, &str, &str)] = &[
    // Greetings and social phrases
    ("Maakye", "mah-kyeh", "Good morning"),
    ("Meakye", "meh-ah-kyeh", "Good morning / I'm fine"),
    ("Maadekwan", "mah-deh-kwahn", "Good afternoon"),
    ("Akwaaba", "ah-kwah-bah", "Welcome"),
    ("Medaase", "meh-dah-seh", "Thank you"),
    ("Daasewoɔ", "dah-seh-woh-uh", "Thank you (plural)"),
    ("Se me kae", "seh meh kah-eh", "Please"),
    // Questions
    ("Ɛte sɛn?", "eh-teh sehn", "How are you?"),
    ("Me din de...", "meh din deh", "My name is..."),
    ("Wo din sɛn?", "woh din sehn", "What is your name?"),
    ("Ɔtwa sɛn?", "aw-twah sehn", "How much is it?"),
    ("Wo aba frɔ hwan?", "woh ah-bah fruh hwahn", "Where do you come from?"),
    ("Wo yɔɔ?", "woh yuh-uh", "Are you okay?"),
    // Affection
    ("Me dɔ wo", "meh daw woh", "I love you"),
    ("Me din", "meh din", "Sweetheart / My darling"),
    ("Ɔdɔ", "oh-daw", "Love / Beloved"),
    ("Me kunu", "meh koo-noo", "My sweetheart"),
    // Responses
    ("Daabi", "dah-bee", "No"),
    ("Aane", "ah-neh", "Yes / Okay"),
    ("Eye", "eh-yeh", "Okay / Yes (agreement)"),
    // Cultural and spiritual
    ("Ɔbɛ me maakye", "aw-beh meh mah-kyeh", "Have a good morning"),
    ("Nyame", "nyah-meh", "God"),
    ("Onyankopɔn", "oh-nyahn-koh-pohn", "Almighty God"),
    ("Adinkra", "ah-din-krah", "Adinkra symbol (cultural)"),
    ("Kwame", "kwah-meh", "Saturday born (male)"),
    ("Akosua", "ah-koh-soo-ah", "Sunday born (female)"),
];
