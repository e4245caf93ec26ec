//! Anchor text tables.
//!
//! Templates carry a `{drug}` placeholder that is filled with the topic and
//! each of its synonyms. Transition phrases wrap contextual anchors.

/// High purchase intent.
pub const COMMERCIAL: &[&str] = &[
    "buy {drug} online",
    "order {drug} tablets",
    "purchase {drug} pills",
    "{drug} for sale",
    "buy {drug} without prescription",
    "order {drug} no rx",
    "get {drug} online",
    "{drug} buy now",
    "cheap {drug} online",
    "discount {drug} pills",
    "best price {drug}",
    "{drug} lowest price",
    "affordable {drug} tablets",
    "{drug} special offer",
    "buy generic {drug}",
    "order {drug} fast delivery",
    "{drug} overnight shipping",
    "buy {drug} discreet",
    "{drug} secure purchase",
    "licensed {drug} pharmacy",
    "{drug} buy online",
    "{drug} order online",
    "{drug} purchase online",
    "{drug} for sale online",
    "{drug} no prescription",
    "{drug} no rx",
    "{drug} no script",
    "{drug} without prescription",
    "{drug} non prescription",
    "{drug} over the counter",
    "{drug} otc",
    "{drug} online pharmacy",
    "{drug} pharmacy usa",
    "cheap {drug}",
    "cheap {drug} online",
    "{drug} cheapest price",
    "{drug} low price",
    "{drug} best price",
    "{drug} discount",
    "{drug} coupon",
    "{drug} promo code",
    "{drug} wholesale",
    "generic {drug} online",
    "legit {drug} online",
    "real {drug} online",
    "authentic {drug} online",
    "{drug} reviews",
    "{drug} forum",
    "{drug} in stock",
    "{drug} bulk",
    "{drug} tablets online",
    "{drug} capsules online",
    "{drug} pills online",
    "buy {drug} no script",
    "order {drug} usa to usa",
    "buy {drug} domestic shipping",
    "{drug} cash on delivery",
    "order {drug} cod",
    "buy {drug} with credit card",
    "purchase {drug} bitcoin",
    "{drug} no dr visit",
    "buy {drug} overnight",
    "{drug} next day delivery",
    "order {drug} no prescription needed",
    "{drug} fedex delivery",
    "buy {drug} pay later",
    "{drug} for sale usa",
    "generic {drug} no rx",
];

/// Guides, effects and dosage.
pub const INFORMATIONAL: &[&str] = &[
    "{drug} dosage guide",
    "how {drug} works",
    "{drug} side effects",
    "{drug} benefits",
    "{drug} usage instructions",
    "taking {drug} safely",
    "{drug} effectiveness",
    "{drug} reviews",
    "{drug} user experiences",
    "is {drug} safe",
    "{drug} for beginners",
    "{drug} complete guide",
    "everything about {drug}",
    "{drug} FAQ",
    "{drug} medication info",
    "understanding {drug}",
    "{drug} therapy",
    "{drug} treatment options",
    "when to use {drug}",
    "{drug} precautions",
];

/// Comparisons with alternatives.
pub const COMPARISON: &[&str] = &[
    "{drug} vs alternatives",
    "comparing {drug} options",
    "{drug} or generic",
    "best {drug} choice",
    "{drug} comparison",
    "generic vs brand {drug}",
    "{drug} alternatives",
    "similar to {drug}",
    "{drug} substitutes",
    "choosing {drug}",
];

/// Brand-style mentions.
pub const BRANDED: &[&str] = &[
    "{drug}",
    "{drug} generic",
    "{drug} pills",
    "{drug} tablets",
    "{drug} medication",
    "{drug} medicine",
    "{drug} drug",
    "{drug} rx",
    "{drug} pharmacy",
    "genuine {drug}",
    "original {drug}",
    "authentic {drug}",
    "real {drug}",
    "quality {drug}",
    "certified {drug}",
    "approved {drug}",
];

/// Long-tail phrases.
pub const LONGTAIL: &[&str] = &[
    "where to buy {drug} online safely",
    "how to order {drug} without prescription",
    "best place to buy {drug} online",
    "can i buy {drug} over the counter",
    "{drug} online pharmacy reviews",
    "cheapest {drug} online pharmacy",
    "buy {drug} from trusted source",
    "order {drug} with fast shipping",
    "{drug} pills available online",
    "get {drug} delivered to your door",
    "legal {drug} online purchase",
    "safe way to buy {drug}",
    "{drug} medication without doctor",
    "online {drug} prescription",
    "how to get {drug} online",
    "buying {drug} internationally",
    "{drug} home delivery service",
    "discrete {drug} purchase online",
    "{drug} express delivery",
    "order {drug} same day delivery",
    "buy {drug} online with fast shipping",
    "order {drug} overnight shipping",
    "buy {drug} with next day delivery",
    "buy {drug} with express delivery",
    "order {drug} usa to usa shipping",
    "buy {drug} usa domestic shipping",
    "buy {drug} with fedex shipping",
    "buy {drug} with ups delivery",
    "order {drug} cash on delivery",
    "buy {drug} cod",
    "buy {drug} pay with credit card",
    "buy {drug} pay with visa",
    "buy {drug} pay with mastercard",
    "buy {drug} pay with paypal",
    "buy {drug} pay with bitcoin",
    "buy {drug} pay with crypto",
    "cheap {drug} online pharmacy usa",
    "discount {drug} online pharmacy",
    "wholesale {drug} tablets online",
    "{drug} bulk tablets online",
    "how to buy {drug} without seeing a doctor",
    "order {drug} online overnight shipping usa",
    "legit website to buy {drug}",
    "buy {drug} online no customs",
    "where to get {drug} without prescription",
    "{drug} online pharmacy accepting visa",
    "buy {drug} with paypal online",
    "order {drug} tablets next day delivery",
    "can i buy {drug} online legally",
    "safest place to order {drug} online",
];

/// Short in-sentence mentions.
pub const CONTEXTUAL: &[&str] = &[
    "{drug}",
    "{drug} tablets",
    "{drug} medication",
    "{drug} pills",
    "{drug} online",
    "{drug} treatment",
    "this {drug}",
    "the {drug}",
    "{drug} therapy",
    "{drug} dosage",
    "{drug} prescription",
    "effective {drug}",
    "popular {drug}",
    "reliable {drug}",
    "proven {drug}",
    "{drug} online pharmacy",
    "{drug} usa pharmacy",
    "{drug} otc",
    "{drug} no prescription",
    "{drug} over the counter",
];

/// Question-form anchors.
pub const QUESTION: &[&str] = &[
    "what is {drug}",
    "how does {drug} work",
    "is {drug} effective",
    "where to get {drug}",
    "can i take {drug}",
    "should i try {drug}",
];

/// Calls to action.
pub const CTA: &[&str] = &[
    "try {drug} today",
    "get your {drug}",
    "start {drug} treatment",
    "order {drug} now",
    "buy {drug} here",
    "shop {drug}",
    "discover {drug}",
    "learn about {drug}",
    "explore {drug}",
    "check {drug} prices",
];

/// Phrases placed before an anchor at the start of a sentence.
pub const TRANSITION_BEFORE: &[&str] = &[
    "You can",
    "Many patients",
    "Doctors recommend to",
    "It's possible to",
    "Consider to",
    "Learn how to",
    "Find out how to",
    "Discover how to",
    "If you need to",
    "Those looking to",
    "Patients often",
    "For those who want to",
    "When you need to",
    "To effectively",
    "The best way to",
    "A reliable option is to",
    "An excellent choice is to",
    "We recommend to",
    "Experts suggest to",
    "Research shows you can",
];

/// Phrases placed after an anchor at the end of a sentence.
pub const TRANSITION_AFTER: &[&str] = &[
    "for best results",
    "at competitive prices",
    "from verified sources",
    "with fast delivery",
    "safely and securely",
    "without hassle",
    "with confidence",
    "from trusted pharmacies",
    "with proper guidance",
    "following medical advice",
    "as recommended",
    "when needed",
    "conveniently",
    "discreetly",
    "affordably",
    "reliably",
    "quickly",
    "easily",
    "today",
    "right now",
    "without a prescription",
    "with overnight delivery",
    "shipped from USA",
    "no doctor required",
    "with cash on delivery",
    "via priority mail",
    "without customs issues",
    "discreetly to your door",
    "using secure payment",
    "with 100% guarantee",
];

/// Action words and their replacements for synonym variations.
pub const ACTION_SYNONYMS: &[(&str, &[&str])] = &[
    ("buy", &["purchase", "order", "get", "obtain", "acquire", "shop for"]),
    ("cheap", &["affordable", "low-cost", "budget", "economical", "inexpensive", "discount"]),
    ("fast", &["quick", "rapid", "express", "speedy", "swift", "overnight"]),
    ("safe", &["secure", "reliable", "trusted", "verified", "legitimate", "certified"]),
    ("online", &["on the internet", "digitally", "via web", "electronically"]),
    ("pills", &["tablets", "capsules", "medication", "medicine", "drug"]),
    ("best", &["top", "finest", "premium", "optimal", "superior", "excellent"]),
    ("effective", &["potent", "powerful", "working", "proven", "reliable"]),
];

/// Modifiers combined with the action roots of the commercial pool.
pub const TAIL_SUFFIXES: &[&str] = &[
    "online",
    "buy online",
    "order online",
    "purchase online",
    "for sale",
    "for sale online",
    "no prescription",
    "no rx",
    "no script",
    "without prescription",
    "no script needed",
    "non prescription",
    "no doctor visit",
    "no dr approval",
    "over the counter",
    "otc",
    "usa to usa",
    "usa domestic",
    "domestic shipping",
    "fast shipping",
    "overnight shipping",
    "overnight delivery",
    "next day delivery",
    "express delivery",
    "fedex shipping",
    "ups delivery",
    "cash on delivery",
    "cod",
    "pay with credit card",
    "pay with visa",
    "pay with mastercard",
    "pay with paypal",
    "pay with bitcoin",
    "pay with crypto",
    "cheap",
    "cheap online",
    "cheapest price",
    "low price",
    "best price",
    "discount",
    "coupon",
    "promo code",
    "wholesale",
    "generic",
    "legit",
    "real",
    "authentic",
    "reviews",
    "forum",
    "in stock",
    "bulk",
    "tablets",
    "capsules",
    "pills",
    "gel",
    "online pharmacy",
    "online pharmacy usa",
    "pharmacy usa",
];

/// Related terms per topic, used for informational variations.
pub const TOPIC_LSI: &[(&str, &[&str])] = &[
    (
        "viagra",
        &[
            "sildenafil",
            "sildenafil citrate",
            "ED treatment",
            "erectile dysfunction",
            "male enhancement",
            "PDE5 inhibitor",
            "impotence treatment",
            "sexual health",
            "blue pill",
            "erection pills",
            "ED medication",
            "performance enhancement",
            "sexual dysfunction",
            "male potency",
            "libido booster",
        ],
    ),
    (
        "cialis",
        &[
            "tadalafil",
            "ED medication",
            "erectile dysfunction",
            "weekend pill",
            "daily ED",
            "36-hour pill",
            "PDE5 inhibitor",
            "impotence",
            "sexual performance",
            "male enhancement",
            "BPH treatment",
            "enlarged prostate",
            "urinary symptoms",
        ],
    ),
    (
        "levitra",
        &[
            "vardenafil",
            "ED pills",
            "erectile dysfunction",
            "impotence treatment",
            "PDE5 inhibitor",
            "sexual health",
            "erection medication",
            "male potency",
            "performance pills",
        ],
    ),
    (
        "kamagra",
        &[
            "sildenafil citrate",
            "ED generic",
            "erectile dysfunction",
            "sexual health",
            "generic viagra",
            "affordable ED",
            "impotence",
        ],
    ),
    (
        "sildalist",
        &[
            "sildenafil",
            "tadalafil",
            "dual action ED",
            "erectile dysfunction",
            "combination therapy",
            "powerful ED treatment",
        ],
    ),
    (
        "tadacip",
        &[
            "tadalafil",
            "generic cialis",
            "ED treatment",
            "weekend pill",
            "erectile dysfunction",
            "PDE5 inhibitor",
        ],
    ),
    (
        "aurogra",
        &[
            "sildenafil",
            "generic viagra",
            "ED pills",
            "erectile dysfunction",
            "affordable sildenafil",
            "male enhancement",
        ],
    ),
    (
        "amoxil",
        &[
            "amoxicillin",
            "antibiotic",
            "bacterial infection",
            "penicillin",
            "strep throat",
            "ear infection",
            "sinus infection",
            "UTI",
            "respiratory infection",
            "dental infection",
            "H. pylori",
        ],
    ),
    (
        "zithromax",
        &[
            "azithromycin",
            "Z-pack",
            "antibiotic",
            "bacterial infection",
            "respiratory infection",
            "STD treatment",
            "chlamydia",
            "bronchitis",
            "pneumonia",
            "skin infection",
            "macrolide antibiotic",
        ],
    ),
    (
        "doxycycline",
        &[
            "antibiotic",
            "bacterial infection",
            "acne treatment",
            "Lyme disease",
            "malaria prevention",
            "chlamydia",
            "tetracycline class",
            "respiratory infection",
            "skin infection",
            "STI treatment",
        ],
    ),
    (
        "flagyl",
        &[
            "metronidazole",
            "antibiotic",
            "bacterial infection",
            "parasites",
            "BV treatment",
            "bacterial vaginosis",
            "trichomoniasis",
            "giardia",
            "C. diff",
            "dental infection",
            "anaerobic bacteria",
        ],
    ),
    (
        "cleocin",
        &[
            "clindamycin",
            "antibiotic",
            "bacterial infection",
            "acne",
            "MRSA",
            "bone infection",
            "skin infection",
            "dental",
        ],
    ),
    (
        "keflex",
        &[
            "cephalexin",
            "antibiotic",
            "bacterial infection",
            "UTI",
            "skin infection",
            "respiratory",
            "cephalosporin",
        ],
    ),
    (
        "tetracycline",
        &[
            "antibiotic",
            "acne treatment",
            "bacterial infection",
            "rosacea",
            "Lyme disease",
            "cholera",
            "plague",
            "broad-spectrum",
        ],
    ),
    (
        "clomid",
        &[
            "clomiphene",
            "clomiphene citrate",
            "fertility",
            "ovulation",
            "PCOS treatment",
            "infertility",
            "ovulation induction",
            "fertility drug",
            "pregnancy help",
            "conceive",
            "fertility medication",
            "anovulation",
            "fertility treatment",
            "egg production",
            "hormonal balance",
        ],
    ),
    (
        "synthroid",
        &[
            "levothyroxine",
            "thyroid",
            "hypothyroidism",
            "hormone replacement",
            "T4 hormone",
            "thyroid medication",
            "underactive thyroid",
            "metabolism",
            "thyroid hormone",
            "Hashimoto's",
        ],
    ),
    (
        "zoloft",
        &[
            "sertraline",
            "antidepressant",
            "SSRI",
            "anxiety",
            "depression",
            "panic disorder",
            "OCD",
            "PTSD",
            "social anxiety",
            "mental health",
            "mood disorder",
        ],
    ),
    (
        "lexapro",
        &[
            "escitalopram",
            "antidepressant",
            "SSRI",
            "anxiety disorder",
            "depression",
            "GAD",
            "panic attacks",
            "mental health",
        ],
    ),
    (
        "paxil",
        &[
            "paroxetine",
            "antidepressant",
            "SSRI",
            "anxiety",
            "depression",
            "panic disorder",
            "social anxiety",
            "OCD",
            "PTSD",
        ],
    ),
    (
        "celexa",
        &[
            "citalopram",
            "antidepressant",
            "SSRI",
            "depression",
            "anxiety",
            "mood disorder",
            "mental health",
        ],
    ),
    (
        "prozac",
        &[
            "fluoxetine",
            "antidepressant",
            "SSRI",
            "depression",
            "anxiety",
            "OCD",
            "bulimia",
            "panic disorder",
            "PMDD",
        ],
    ),
    (
        "fluoxetine",
        &[
            "Prozac",
            "antidepressant",
            "SSRI",
            "depression",
            "anxiety",
            "OCD",
            "eating disorders",
            "mental health",
        ],
    ),
    (
        "provigil",
        &[
            "modafinil",
            "wakefulness",
            "narcolepsy",
            "cognitive enhancer",
            "sleep disorder",
            "shift work",
            "alertness",
            "focus",
            "smart drug",
            "nootropic",
            "fatigue",
        ],
    ),
    (
        "buspar",
        &[
            "buspirone",
            "anxiety",
            "anxiolytic",
            "GAD",
            "generalized anxiety",
            "anti-anxiety",
            "non-benzo",
            "mental health",
        ],
    ),
    (
        "trazodone",
        &[
            "antidepressant",
            "sleep aid",
            "insomnia",
            "depression",
            "anxiety",
            "sleep disorder",
            "sedative",
        ],
    ),
    (
        "amitriptyline",
        &[
            "tricyclic antidepressant",
            "TCA",
            "depression",
            "nerve pain",
            "migraine prevention",
            "chronic pain",
            "fibromyalgia",
        ],
    ),
    (
        "lyrica",
        &[
            "pregabalin",
            "nerve pain",
            "fibromyalgia",
            "neuropathy",
            "seizures",
            "diabetic neuropathy",
            "chronic pain",
            "anxiety",
            "shingles pain",
            "postherpetic neuralgia",
        ],
    ),
    (
        "neurontin",
        &[
            "gabapentin",
            "nerve pain",
            "seizures",
            "neuropathy",
            "epilepsy",
            "chronic pain",
            "restless leg",
            "shingles pain",
        ],
    ),
    (
        "toradol",
        &[
            "ketorolac",
            "NSAID",
            "pain relief",
            "anti-inflammatory",
            "short-term pain",
            "post-surgery",
            "migraine",
        ],
    ),
    (
        "celebrex",
        &[
            "celecoxib",
            "NSAID",
            "arthritis",
            "pain relief",
            "inflammation",
            "COX-2 inhibitor",
            "joint pain",
            "osteoarthritis",
            "rheumatoid",
        ],
    ),
    (
        "indocin",
        &[
            "indomethacin",
            "NSAID",
            "gout",
            "arthritis",
            "inflammation",
            "pain relief",
            "bursitis",
            "tendinitis",
        ],
    ),
    (
        "accutane",
        &[
            "isotretinoin",
            "acne",
            "severe acne",
            "skin treatment",
            "cystic acne",
            "nodular acne",
            "retinoid",
            "vitamin A derivative",
            "acne medication",
            "clear skin",
        ],
    ),
    (
        "propecia",
        &[
            "finasteride",
            "hair loss",
            "male pattern baldness",
            "DHT blocker",
            "androgenic alopecia",
            "hair regrowth",
            "hair restoration",
            "balding treatment",
            "5-alpha reductase inhibitor",
        ],
    ),
    (
        "diflucan",
        &[
            "fluconazole",
            "antifungal",
            "yeast infection",
            "candida",
            "thrush",
            "fungal infection",
            "vaginal yeast",
        ],
    ),
    (
        "zovirax",
        &[
            "acyclovir",
            "antiviral",
            "herpes",
            "cold sores",
            "shingles",
            "HSV",
            "genital herpes",
            "chickenpox",
        ],
    ),
    (
        "lipitor",
        &[
            "atorvastatin",
            "cholesterol",
            "statin",
            "cardiovascular",
            "heart health",
            "LDL",
            "high cholesterol",
            "hyperlipidemia",
        ],
    ),
    (
        "lisinopril",
        &[
            "ACE inhibitor",
            "blood pressure",
            "hypertension",
            "heart",
            "cardiovascular",
            "heart failure",
            "kidney protection",
        ],
    ),
    (
        "norvasc",
        &[
            "amlodipine",
            "calcium channel blocker",
            "blood pressure",
            "hypertension",
            "angina",
            "cardiovascular",
        ],
    ),
    (
        "lopressor",
        &[
            "metoprolol",
            "beta blocker",
            "blood pressure",
            "heart rate",
            "hypertension",
            "angina",
            "heart attack prevention",
        ],
    ),
    (
        "inderal",
        &[
            "propranolol",
            "beta blocker",
            "blood pressure",
            "anxiety",
            "migraine prevention",
            "tremor",
            "heart rate",
        ],
    ),
    (
        "lasix",
        &[
            "furosemide",
            "diuretic",
            "water pill",
            "edema",
            "blood pressure",
            "swelling",
            "fluid retention",
            "heart failure",
            "kidney",
        ],
    ),
    (
        "metformin",
        &[
            "diabetes",
            "blood sugar",
            "type 2 diabetes",
            "insulin resistance",
            "glucose control",
            "A1C",
            "metabolic syndrome",
            "PCOS",
        ],
    ),
    (
        "rybelsus",
        &[
            "semaglutide",
            "GLP-1",
            "diabetes",
            "type 2 diabetes",
            "blood sugar",
            "weight loss",
            "oral semaglutide",
        ],
    ),
    (
        "xenical",
        &[
            "orlistat",
            "weight loss",
            "obesity",
            "fat absorption",
            "diet pill",
            "BMI",
            "weight management",
        ],
    ),
    (
        "valtrex",
        &[
            "valacyclovir",
            "herpes",
            "cold sores",
            "antiviral",
            "shingles",
            "HSV",
            "genital herpes",
            "outbreak prevention",
            "suppressive therapy",
        ],
    ),
    (
        "soolantra",
        &[
            "ivermectin cream",
            "ivermectin 1% cream",
            "topical ivermectin",
            "rosacea",
            "rosacea treatment",
            "facial redness",
            "papulopustular rosacea",
            "soolantra cream",
            "skin inflammation",
            "dermatology",
        ],
    ),
    (
        "stromectol",
        &[
            "ivermectin",
            "parasites",
            "antiparasitic",
            "worms",
            "scabies",
            "river blindness",
            "strongyloides",
            "onchocerciasis",
        ],
    ),
    (
        "albenza",
        &[
            "albendazole",
            "antiparasitic",
            "worms",
            "parasites",
            "tapeworm",
            "roundworm",
            "pinworm",
        ],
    ),
    (
        "singulair",
        &[
            "montelukast",
            "asthma",
            "allergies",
            "leukotriene",
            "breathing",
            "seasonal allergies",
            "exercise-induced asthma",
        ],
    ),
    (
        "ventolin",
        &[
            "albuterol",
            "salbutamol",
            "asthma",
            "bronchodilator",
            "inhaler",
            "breathing",
            "COPD",
            "rescue inhaler",
        ],
    ),
    (
        "atarax",
        &[
            "hydroxyzine",
            "antihistamine",
            "anxiety",
            "itching",
            "allergies",
            "sedative",
            "hives",
        ],
    ),
    (
        "prednisone",
        &[
            "corticosteroid",
            "inflammation",
            "immune system",
            "allergies",
            "asthma",
            "arthritis",
            "lupus",
            "autoimmune",
            "steroid",
            "anti-inflammatory",
        ],
    ),
    (
        "deltasone",
        &[
            "prednisone",
            "corticosteroid",
            "inflammation",
            "autoimmune",
            "allergies",
            "steroid",
        ],
    ),
    (
        "colchicine",
        &[
            "gout",
            "gout treatment",
            "uric acid",
            "joint pain",
            "gout attack",
            "inflammation",
            "pericarditis",
        ],
    ),
    (
        "naltrexone",
        &[
            "opioid antagonist",
            "alcohol dependence",
            "addiction",
            "opioid addiction",
            "craving reduction",
            "recovery",
        ],
    ),
    (
        "antabuse",
        &[
            "disulfiram",
            "alcohol dependence",
            "alcoholism",
            "addiction",
            "alcohol deterrent",
            "sobriety",
        ],
    ),
    (
        "champix",
        &[
            "varenicline",
            "smoking cessation",
            "quit smoking",
            "nicotine addiction",
            "tobacco",
            "stop smoking",
        ],
    ),
    (
        "zyban",
        &[
            "bupropion",
            "smoking cessation",
            "quit smoking",
            "antidepressant",
            "nicotine withdrawal",
        ],
    ),
    (
        "cytotec",
        &[
            "misoprostol",
            "ulcer",
            "NSAID protection",
            "gastric",
            "stomach protection",
            "prostaglandin",
        ],
    ),
    (
        "motilium",
        &[
            "domperidone",
            "nausea",
            "vomiting",
            "gastroparesis",
            "digestive",
            "stomach motility",
        ],
    ),
    (
        "dapoxetine",
        &[
            "premature ejaculation",
            "PE treatment",
            "SSRI",
            "sexual health",
            "ejaculation control",
        ],
    ),
];

/// Related terms for a topic, case-insensitive.
#[must_use]
pub fn lsi_terms(topic: &str) -> &'static [&'static str] {
    let topic = topic.to_lowercase();
    TOPIC_LSI
        .iter()
        .find(|(name, _)| *name == topic)
        .map_or(&[], |(_, terms)| terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_has_placeholder() {
        for table in [COMMERCIAL, INFORMATIONAL, COMPARISON, BRANDED, LONGTAIL, CONTEXTUAL, QUESTION, CTA] {
            for template in table {
                assert!(template.contains("{drug}"), "{template}");
            }
        }
    }

    #[test]
    fn lsi_lookup() {
        assert!(lsi_terms("Viagra").contains(&"sildenafil"));
        assert!(lsi_terms("unknown-topic").is_empty());
    }
}
