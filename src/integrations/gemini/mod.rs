// src/integrations/gemini/mod.rs
//
// Gemini generateContent client used for movie metadata lookup

pub mod client;
