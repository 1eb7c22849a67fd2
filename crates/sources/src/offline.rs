//! Static offline table of well-known titles.
//!
//! Used as the last strategy when the remote APIs cannot answer. It never
//! fails; an unknown subject simply has no titles.

use crate::error::Result;
use crate::traits::RemoteSource;
use crate::types::{RemoteQuery, RemoteRecord};
use async_trait::async_trait;
use data_loader::MediaType;

type Entry = (&'static str, Option<u16>);

const MOVIES: &[(&str, &[Entry])] = &[
    (
        "Action",
        &[
            ("John Wick", Some(2014)),
            ("Mad Max: Fury Road", Some(2015)),
            ("Die Hard", Some(1988)),
            ("Gladiator", Some(2000)),
            ("Mission Impossible", Some(1996)),
            ("The Dark Knight", Some(2008)),
            ("The Terminator", Some(1984)),
            ("Lethal Weapon", Some(1987)),
            ("Speed", Some(1994)),
            ("Edge of Tomorrow", Some(2014)),
        ],
    ),
    (
        "Comedy",
        &[
            ("The Mask", Some(1994)),
            ("Superbad", Some(2007)),
            ("The Hangover", Some(2009)),
            ("Step Brothers", Some(2008)),
            ("Home Alone", Some(1990)),
            ("Ted", Some(2012)),
            ("21 Jump Street", Some(2012)),
            ("Crazy Rich Asians", Some(2018)),
        ],
    ),
    (
        "Drama",
        &[
            ("The Shawshank Redemption", Some(1994)),
            ("Forrest Gump", Some(1994)),
            ("The Green Mile", Some(1999)),
            ("Fight Club", Some(1999)),
            ("A Beautiful Mind", Some(2001)),
            ("The Pursuit of Happyness", Some(2006)),
            ("The Godfather", Some(1972)),
            ("Good Will Hunting", Some(1997)),
        ],
    ),
    (
        "Sci-Fi",
        &[
            ("Interstellar", Some(2014)),
            ("Inception", Some(2010)),
            ("The Matrix", Some(1999)),
            ("Blade Runner 2049", Some(2017)),
            ("Arrival", Some(2016)),
            ("Ex Machina", Some(2014)),
            ("Star Wars: A New Hope", Some(1977)),
            ("The Empire Strikes Back", Some(1980)),
        ],
    ),
    (
        "Thriller",
        &[
            ("Se7en", Some(1995)),
            ("Gone Girl", Some(2014)),
            ("Shutter Island", Some(2010)),
            ("Parasite", Some(2019)),
            ("Prisoners", Some(2013)),
            ("Zodiac", Some(2007)),
            ("Psycho", Some(1960)),
            ("The Silence of the Lambs", Some(1991)),
        ],
    ),
];

const BOOKS: &[(&str, &[Entry])] = &[
    (
        "Fantasy",
        &[
            ("Harry Potter", Some(1997)),
            ("The Hobbit", Some(1937)),
            ("Percy Jackson", Some(2005)),
            ("Game of Thrones", Some(1996)),
            ("The Name of the Wind", Some(2007)),
            ("Mistborn", Some(2006)),
            ("Eragon", None),
        ],
    ),
    (
        "Mystery",
        &[
            ("Sherlock Holmes", Some(1892)),
            ("Gone Girl", Some(2012)),
            ("The Girl with the Dragon Tattoo", Some(2005)),
            ("Big Little Lies", Some(2014)),
            ("And Then There Were None", Some(1939)),
            ("In the Woods", Some(2007)),
        ],
    ),
    (
        "Romance",
        &[
            ("Pride and Prejudice", Some(1813)),
            ("Me Before You", Some(2012)),
            ("The Notebook", Some(1996)),
            ("Twilight", Some(2005)),
            ("Outlander", Some(1991)),
            ("The Time Traveler’s Wife", Some(2003)),
        ],
    ),
    (
        "Self-Help",
        &[
            ("Atomic Habits", Some(2018)),
            ("Deep Work", Some(2016)),
            ("The 7 Habits of Highly Effective People", Some(1989)),
            ("Think and Grow Rich", Some(1937)),
            ("The Power of Now", Some(1997)),
            ("Can’t Hurt Me", Some(2018)),
        ],
    ),
    (
        "Sci-Fi",
        &[
            ("Dune", Some(1965)),
            ("Neuromancer", Some(1984)),
            ("Ender’s Game", Some(1985)),
            ("Ready Player One", Some(2011)),
            ("The Martian", Some(2014)),
            ("Snow Crash", Some(1992)),
        ],
    ),
    (
        "Horror",
        &[
            ("It", None),
            ("The Shining", None),
            ("Dracula", None),
            ("Frankenstein", None),
        ],
    ),
    (
        "Biography",
        &[
            ("Steve Jobs", None),
            ("Becoming", None),
            ("Educated", None),
            ("Long Walk to Freedom", None),
        ],
    ),
];

/// Offline source over the built-in table
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalogSource;

impl StaticCatalogSource {
    pub fn new() -> Self {
        Self
    }

    /// Subjects known for `media`, in table order
    pub fn subjects(media: MediaType) -> Vec<&'static str> {
        table(media).iter().map(|(subject, _)| *subject).collect()
    }

    /// Titles for `subject` released in `year`. When none is from that year
    /// the whole subject list is returned, like "showing similar picks".
    /// Entries without a known year match any year.
    pub fn lookup(media: MediaType, subject: &str, year: u16) -> Vec<RemoteRecord> {
        let Some((_, entries)) = table(media)
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(subject.trim()))
        else {
            return Vec::new();
        };

        let to_record = |(title, released): &Entry| RemoteRecord::new(*title, *released, None);
        let same_year: Vec<RemoteRecord> = entries
            .iter()
            .filter(|(_, y)| y.is_none_or(|y| y == year))
            .map(to_record)
            .collect();

        if same_year.is_empty() {
            entries.iter().map(to_record).collect()
        } else {
            same_year
        }
    }
}

fn table(media: MediaType) -> &'static [(&'static str, &'static [Entry])] {
    match media {
        MediaType::Movie => MOVIES,
        MediaType::Book => BOOKS,
    }
}

#[async_trait]
impl RemoteSource for StaticCatalogSource {
    fn name(&self) -> &str {
        "offline"
    }

    async fn fetch(&self, query: &RemoteQuery) -> Result<Vec<RemoteRecord>> {
        // the table has a single page
        if query.page > 1 {
            return Ok(Vec::new());
        }
        Ok(Self::lookup(query.media, &query.subject, query.year))
    }
}
