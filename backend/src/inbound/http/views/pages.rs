//! Informational pages, the calculator form and published content pages.

use maud::{Markup, html};

use crate::domain::{ContentPage, FoodCategory};

use super::{Chrome, layout};

/// Topic section a static page belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Emissions,
    Ecology,
    Organic,
}

impl Section {
    /// Path of the section's landing page.
    pub fn root(self) -> &'static str {
        match self {
            Self::Emissions => "/emissioner-og-baeredygtighed",
            Self::Ecology => "/oekologi",
            Self::Organic => "/okologi",
        }
    }
}

/// One entry in the static route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticPage {
    pub path: &'static str,
    pub title: &'static str,
    pub section: Section,
    pub paragraphs: &'static [&'static str],
}

/// Every informational page served from the route table.
pub const STATIC_PAGES: &[StaticPage] = &[
    StaticPage {
        path: "/emissioner-og-baeredygtighed",
        title: "Emissioner og bæredygtighed",
        section: Section::Emissions,
        paragraphs: &[
            "Fødevarer står for omkring en fjerdedel af verdens drivhusgasudledning.",
            "Her samler vi viden om, hvor udledningen opstår, og hvordan den kan reduceres.",
        ],
    },
    StaticPage {
        path: "/emissioner-og-baeredygtighed/fodevare-relaterede-emissioner",
        title: "Fødevarerelaterede emissioner",
        section: Section::Emissions,
        paragraphs: &[
            "Animalske fødevarer har typisk det største klimaaftryk pr. kilo.",
            "Oksekød og lam udleder metan fra fordøjelsen, mens planteføde generelt ligger lavt.",
        ],
    },
    StaticPage {
        path: "/emissioner-og-baeredygtighed/datadrevet-tilgang",
        title: "Datadrevet tilgang",
        section: Section::Emissions,
        paragraphs: &[
            "Indkøbsdata gør det muligt at måle klimaaftrykket fra en hel kantine.",
            "Med tal på bordet kan man prioritere de ændringer, der flytter mest.",
        ],
    },
    StaticPage {
        path: "/emissioner-og-baeredygtighed/branchepraestation",
        title: "Branchepræstation",
        section: Section::Emissions,
        paragraphs: &[
            "Sammenligning på tværs af branchen viser, hvor langt de bedste er nået.",
        ],
    },
    StaticPage {
        path: "/emissioner-og-baeredygtighed/politisk-landskab",
        title: "Politisk landskab",
        section: Section::Emissions,
        paragraphs: &[
            "Klimaloven og EU's rapporteringskrav sætter rammerne for fødevaresektoren.",
        ],
    },
    StaticPage {
        path: "/emissioner-og-baeredygtighed/klimadata",
        title: "Klimadata",
        section: Section::Emissions,
        paragraphs: &[
            "Emissionsfaktorerne i beregneren er gennemsnit fra livscyklusanalyser.",
        ],
    },
    StaticPage {
        path: "/oekologi",
        title: "Økologi",
        section: Section::Ecology,
        paragraphs: &[
            "Økologisk produktion handler om jordens frugtbarhed, dyrevelfærd og biodiversitet.",
        ],
    },
    StaticPage {
        path: "/okologi",
        title: "Økologi i praksis",
        section: Section::Organic,
        paragraphs: &[
            "Fra regler og mærkninger til omlægning af kantinen: her er det praktiske overblik.",
        ],
    },
    StaticPage {
        path: "/okologi/hvad-er",
        title: "Hvad er økologi?",
        section: Section::Organic,
        paragraphs: &[
            "Økologiske varer dyrkes uden kunstgødning og kemiske sprøjtemidler.",
        ],
    },
    StaticPage {
        path: "/okologi/regulering",
        title: "Regulering",
        section: Section::Organic,
        paragraphs: &[
            "Det røde Ø-mærke garanterer, at produktionen er kontrolleret af myndighederne.",
        ],
    },
    StaticPage {
        path: "/okologi/kantinen",
        title: "Økologi i kantinen",
        section: Section::Organic,
        paragraphs: &[
            "Det økologiske spisemærke viser andelen af økologiske råvarer i køkkenet.",
        ],
    },
    StaticPage {
        path: "/okologi/fordele",
        title: "Fordele ved økologi",
        section: Section::Organic,
        paragraphs: &[
            "Færre pesticidrester, mere natur i landbruget og højere dyrevelfærd.",
        ],
    },
    StaticPage {
        path: "/okologi/nuanceret",
        title: "Et nuanceret blik",
        section: Section::Organic,
        paragraphs: &[
            "Lavere udbytte pr. hektar betyder, at økologi ikke altid giver mindre CO2 pr. kilo.",
        ],
    },
    StaticPage {
        path: "/okologi/esg",
        title: "Økologi og ESG",
        section: Section::Organic,
        paragraphs: &[
            "Økologiske indkøb indgår i virksomhedens rapportering om miljø og ansvarlighed.",
        ],
    },
];

fn subpages(section: Section) -> impl Iterator<Item = &'static StaticPage> {
    STATIC_PAGES
        .iter()
        .filter(move |page| page.section == section && page.path != section.root())
}

/// Render a static informational page.
pub fn static_page(chrome: &Chrome<'_>, page: &StaticPage) -> Markup {
    let is_root = page.path == page.section.root();
    layout(
        chrome,
        page.title,
        html! {
            article.info-page {
                h1 { (page.title) }
                @for paragraph in page.paragraphs {
                    p { (paragraph) }
                }
                @if is_root {
                    ul.subpages {
                        @for sub in subpages(page.section) {
                            li { a href=(sub.path) { (sub.title) } }
                        }
                    }
                } @else {
                    p { a href=(page.section.root()) { "Tilbage til oversigten" } }
                }
            }
        },
    )
}

/// Render the landing page.
pub fn home(chrome: &Chrome<'_>) -> Markup {
    layout(
        chrome,
        "Forside",
        html! {
            section.hero {
                h1 { "Viden om mad, klima og økologi" }
                p { "Fakta og værktøjer til en mere bæredygtig kantine." }
            }
            ul.sections {
                li { a href=(Section::Emissions.root()) { "Emissioner og bæredygtighed" } }
                li { a href=(Section::Ecology.root()) { "Økologi" } }
                li { a href=(Section::Organic.root()) { "Økologi i praksis" } }
                li { a href="/calculator" { "Beregn klimaaftrykket af dine råvarer" } }
            }
        },
    )
}

/// Render the calculator form; a script posts to `/api/calculate-co2`.
pub fn calculator(chrome: &Chrome<'_>) -> Markup {
    layout(
        chrome,
        "CO2-beregner",
        html! {
            h1 { "CO2-beregner" }
            form #co2-form {
                label for="food_type" { "Fødevare" }
                select #food_type name="food_type" {
                    @for category in FoodCategory::ALL {
                        option value=(category.key()) { (category.label()) }
                    }
                }
                label for="quantity" { "Mængde (kg)" }
                input #quantity type="number" name="quantity" min="0" step="0.1" value="1";
                button type="submit" { "Beregn" }
            }
            output #co2-result {}
            script src="/static/js/calculator.js" defer {}
        },
    )
}

/// Render a published content page.
pub fn content_page(chrome: &Chrome<'_>, page: &ContentPage) -> Markup {
    layout(
        chrome,
        &page.title,
        html! {
            article.content-page {
                h1 { (page.title) }
                p.topic { (page.topic) }
                @for paragraph in page.content.split("\n\n") {
                    p { (paragraph) }
                }
                p.updated { "Opdateret " (page.updated_at.format("%d.%m.%Y").to_string()) }
            }
        },
    )
}
