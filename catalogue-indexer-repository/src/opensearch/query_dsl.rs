//! Rendering of [`BooleanQuery`] into the OpenSearch query DSL.

use catalogue_indexer_shared::{BooleanQuery, QueryClause};
use serde_json::{json, Map, Value};

/// Render a boolean query as a `bool` query.
///
/// Each clause goes into `must`; a match-any clause becomes a nested `bool`
/// query with only `should` clauses, so at least one of them has to match.
pub fn to_query_dsl(query: &BooleanQuery) -> Value {
    let must: Vec<Value> = query.must.iter().map(clause_to_dsl).collect();
    json!({ "bool": { "must": must } })
}

fn clause_to_dsl(clause: &QueryClause) -> Value {
    match clause {
        QueryClause::Match { field, value } => {
            let mut phrase = Map::new();
            phrase.insert(field.clone(), Value::String(value.clone()));
            json!({ "match_phrase": phrase })
        }
        QueryClause::AnyOf(clauses) => {
            let should: Vec<Value> = clauses.iter().map(clause_to_dsl).collect();
            json!({ "bool": { "should": should } })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogue_indexer_shared::QueryParams;

    #[test]
    fn test_repeated_key_renders_should() {
        let params = QueryParams::from_pairs(vec![("id", "1"), ("id", "2"), ("type", "product")]);
        let dsl = to_query_dsl(&BooleanQuery::translate(&params));

        assert_eq!(
            dsl,
            json!({
                "bool": {
                    "must": [
                        { "bool": { "should": [
                            { "match_phrase": { "id": "1" } },
                            { "match_phrase": { "id": "2" } }
                        ] } },
                        { "match_phrase": { "type": "product" } }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_empty_query_renders_empty_must() {
        let dsl = to_query_dsl(&BooleanQuery::default());
        assert_eq!(dsl, json!({ "bool": { "must": [] } }));
    }
}
