// templates/pages/educational.rs

use crate::templates::desktop_layout;
use maud::{html, Markup};

struct Parameter {
    name: &'static str,
    what: &'static str,
    why: &'static str,
    ideal: &'static str,
}

const PARAMETERS: [Parameter; 4] = [
    Parameter {
        name: "🌡️ Temperature",
        what: "How warm or cold the water is.",
        why: "Water that is too hot or too cold stresses roots and slows nutrient uptake.",
        ideal: "10°C – 25°C for most plants.",
    },
    Parameter {
        name: "⚡ TDS (Total Dissolved Solids)",
        what: "The concentration of dissolved minerals, salts and organic matter.",
        why: "Too many dissolved solids interfere with water and nutrient uptake.",
        ideal: "300 – 1000 ppm for most plants; sensitive plants need less.",
    },
    Parameter {
        name: "🧪 pH",
        what: "How acidic or alkaline the water is, on a scale of 0 to 14.",
        why: "pH controls how easily plants absorb nutrients from soil and water.",
        ideal: "6.5 – 8.5 for most plants.",
    },
    Parameter {
        name: "🌫️ Turbidity",
        what: "How cloudy the water is, from silt, algae or other particles.",
        why: "Cloudy water clogs irrigation lines and can carry harmful substances.",
        ideal: "Below 5 NTU; the lower the better.",
    },
];

// (plant, TDS ppm, pH, temperature °C, notes)
const PLANTS: [(&str, &str, &str, &str, &str); 5] = [
    ("Leafy Greens", "400–800", "6.0–6.5", "15–25", "Sensitive to high salts"),
    ("Tomatoes", "800–1200", "5.8–6.8", "18–26", "Moderate TDS tolerance"),
    ("Flowers", "300–700", "6.0–7.0", "15–30", "Watch for pH drift"),
    ("Herbs", "500–1000", "5.5–6.5", "15–25", "Need consistent quality"),
    ("Root Vegetables", "500–1000", "6.0–6.8", "15–22", "Sensitive to high turbidity"),
];

// (heading, [(situation, [remedies])])
const REMEDIES: [(&str, &[(&str, &[&str])]); 4] = [
    (
        "🌫️ Turbidity",
        &[(
            "To reduce high turbidity",
            &[
                "Filter mechanically with mesh, sand or cartridge filters.",
                "Let water settle in tanks so suspended solids sink before use.",
                "Avoid murky or algae-contaminated sources.",
            ],
        )],
    ),
    (
        "🧪 pH",
        &[
            (
                "To raise pH (water too acidic)",
                &["Add measured amounts of agricultural lime or potassium carbonate."],
            ),
            (
                "To lower pH (water too alkaline)",
                &["Use approved acidifiers such as phosphoric, nitric or citric acid."],
            ),
        ],
    ),
    (
        "⚡ TDS",
        &[
            (
                "To reduce high TDS",
                &[
                    "Dilute with a cleaner water source.",
                    "Run the water through reverse osmosis.",
                ],
            ),
            (
                "To increase low TDS",
                &["Add water-soluble fertilizer through fertigation."],
            ),
        ],
    ),
    (
        "🌡️ Temperature",
        &[(
            "To lower water temperature",
            &[
                "Store water in shaded or underground containers.",
                "Irrigate early in the morning or late in the evening.",
            ],
        )],
    ),
];

pub fn educational_page() -> Markup {
    desktop_layout(
        "Educational Content",
        "/educational",
        html! {
            main class="container columns" {
                section class="card" {
                    h2 { "🌱 1. Introduction to Smart Irrigation" }
                    p {
                        "Smart irrigation uses sensors to water plants efficiently and sustainably. "
                        "Checking the quality of the water before it reaches the plants keeps them "
                        "healthy and avoids damage from poor water."
                    }
                    p {
                        "Temperature, TDS, pH and turbidity sensors report in real time, and each "
                        "reading is classified as suitable or unsuitable for irrigation."
                    }
                }

                section class="card" {
                    h2 { "💧 2. Understanding Water Quality Parameters" }
                    @for param in &PARAMETERS {
                        h3 { (param.name) }
                        p { strong { "What it is" } ": " (param.what) }
                        p { strong { "Why it matters" } ": " (param.why) }
                        p { strong { "Ideal range" } ": " (param.ideal) }
                    }
                }

                section class="card" {
                    h2 { "🌿 3. Ideal Ranges for Different Plants" }
                    table {
                        thead {
                            tr {
                                th { "Plant Type" }
                                th { "TDS (ppm)" }
                                th { "pH" }
                                th { "Temperature (°C)" }
                                th { "Notes" }
                            }
                        }
                        tbody {
                            @for (plant, tds, ph, temp, notes) in PLANTS {
                                tr {
                                    td { (plant) }
                                    td { (tds) }
                                    td { (ph) }
                                    td { (temp) }
                                    td { (notes) }
                                }
                            }
                        }
                    }
                    p class="muted" { strong { "Tip: " } "check your specific plant’s requirements when possible." }
                }

                section class="card" {
                    h2 { "🛠️ 4. Water Quality Improvement Guidelines" }
                    @for (heading, situations) in REMEDIES {
                        h3 { (heading) }
                        ul {
                            @for (situation, steps) in situations.iter() {
                                li { strong { (situation) ":" } }
                                @for step in steps.iter() {
                                    li { (step) }
                                }
                            }
                        }
                    }
                }

                section class="card" {
                    h2 { "⚙️ 5. System Methodology" }
                    h3 { "📊 Data Collection" }
                    p { "Sensors continuously record temperature, turbidity, pH and TDS into a realtime database." }
                    h3 { "🧠 Model Training" }
                    p { "The collected data is split into training and test sets and a model learns which readings are fit for irrigation." }
                    h3 { "⏱️ Real-Time Assessment" }
                    p { "Each new reading is classified as it arrives. Readings within safe limits are marked suitable; otherwise the water is flagged unsuitable with an explanation." }
                    h3 { "🖥️ Web Application Display" }
                    p { "The monitor page shows the live sensor values, the suitability status and the reasons behind it." }
                    h3 { "🔄 Continuous Monitoring" }
                    p { "New readings keep extending the dataset. They are reviewed before any retraining so decisions stay consistent." }
                }
            }
        },
    )
}
