use crate::syntax::Syntax;
use std::iter;

/// Lookup strings for an entry name, starting with the name itself (sdcv
/// needs the headword among the synonyms). Every form is followed by its
/// lowercase version, which KOReader needs for lowercase lookups of a full
/// name. Forms may repeat; empty forms are never produced.
///
/// - `Robert (Bob) Jordan` -> `Bob Jordan`, `Robert Jordan`
/// - `Robert (of Jordan)` -> `Robert of Jordan`, `Robert`
/// - every space separated token with parentheses stripped
/// - `al'Jordan` -> also `Jordan`
pub fn alternate_words<'a>(syntax: &'a Syntax, name: &'a str) -> impl Iterator<Item = String> + 'a {
    let aliases = syntax
        .parenthetical
        .captures(name)
        .into_iter()
        .flat_map(|caps| {
            let part = |i| caps.get(i).map_or("", |m| m.as_str());
            let (before, inside, after) = (part(1), part(2), part(3));
            let alias = if after.is_empty() {
                join_words(&[before, inside])
            } else {
                join_words(&[inside, after])
            };
            [alias, join_words(&[before, after])]
        });

    // Tokens include particles like "of" or "al"; harmless to have in the
    // synonym index.
    let tokens = name
        .split(' ')
        .map(|token| token.trim_matches(|c: char| c == '(' || c == ')'))
        .filter(|word| !word.is_empty())
        .flat_map(move |word| {
            let stem = syntax
                .particle
                .captures(word)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
                .filter(|stem| !stem.is_empty());
            iter::once(word).chain(stem).map(str::to_owned)
        });

    iter::once(name.to_owned())
        .chain(aliases)
        .chain(tokens)
        .filter(|word| !word.is_empty())
        .flat_map(|word| {
            let lower = word.to_lowercase();
            [word, lower]
        })
}

fn join_words(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
