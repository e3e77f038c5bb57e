/// Words every built-in dictionary starts with: a general English
/// vocabulary plus the most common function words.
pub const DEFAULT_WORDS: &[&str] = &[
    "a", "ability", "able", "about", "above", "accept", "access", "accident", "according",
    "account", "achieve", "across", "act", "action", "activity", "actor", "actually", "add",
    "address", "advance", "advice", "affect", "afford", "after", "again", "against", "age",
    "agency", "air", "all", "allow", "almost", "alone", "already", "also", "although", "always",
    "am", "among", "amount", "an", "analysis", "and", "animal", "another", "answer", "anxiety",
    "any", "anyone", "anything", "appear", "apply", "area", "argue", "army", "arrange", "art",
    "article", "as", "aspect", "assault", "assess", "assign", "assist", "assume", "at", "athlete",
    "attempt", "attract", "average", "aware", "back", "balance", "ball", "band", "bar", "base",
    "basic", "battery", "be", "beautiful", "become", "before", "begin", "behavior", "behind",
    "believe", "benefit", "best", "better", "between", "beyond", "billion", "bitter", "black",
    "blood", "board", "body", "bottle", "bottom", "boundary", "bravery", "breathe", "brother",
    "budget", "build", "but", "button", "cancer", "capital", "capture", "car", "care", "cause",
    "center", "chance", "change", "charge", "cheap", "choice", "citizen", "classic", "climate",
    "close", "coffee", "color", "common", "community", "company", "compare", "complete", "complex",
    "connect", "control", "courage", "create", "cultural", "current", "damage", "dancer", "danger",
    "data", "decide", "defend", "define", "degree", "demand", "detect", "develop", "disease",
    "district", "divide", "do", "doctor", "domestic", "during", "dynamic", "economy", "education",
    "effect", "eliminate", "energy", "engage", "environment", "error", "evaluate", "example",
    "expand", "experience", "factor", "feature", "final", "finance", "flavor", "flood", "follow",
    "for", "forget", "form", "former", "friend", "front", "future", "gallery", "generate",
    "govern", "grade", "grand", "handle", "happen", "harbor", "harmony", "have", "he", "health",
    "hearing", "height", "honor", "hotel", "human", "i", "ideal", "impact", "implement", "import",
    "improve", "in", "increase", "initial", "insert", "inspire", "interior", "invest", "it",
    "journal", "journey", "judge", "keen", "labor", "land", "leader", "legacy", "level", "library",
    "limit", "literature", "local", "manage", "market", "measure", "memory", "mention", "message",
    "method", "modern", "moment", "monitor", "network", "not", "notice", "obtain", "occur", "of",
    "office", "on", "online", "option", "outcome", "overcome", "partner", "pattern", "performance",
    "planet", "positive", "power", "practical", "preach", "prepare", "process", "project",
    "public", "purpose", "quality", "quote", "react", "reality", "relate", "research", "result",
    "reveal", "revenue", "safety", "science", "secure", "segment", "sensitive", "service",
    "settle", "signal", "situation", "society", "source", "special", "speech", "spirit",
    "standard", "strength", "submit", "success", "supply", "support", "surface", "sustain",
    "system", "talent", "teacher", "that", "the", "theory", "thrive", "throne", "to", "together",
    "traffic", "transform", "unique", "unite", "universe", "update", "urban", "utilize", "visible",
    "vision", "vital", "wealth", "weigh", "wellness", "with", "within", "witness", "wonder", "you",
    "youth", "zeal",
];
