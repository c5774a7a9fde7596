//! Compilation of complete listing parameters.

use serde::Serialize;

use crate::config::ListingConfig;
use crate::error::Result;
use crate::filter::{Condition, ConditionEvaluator, Record, TreeBuilder};
use crate::page::PageSpec;
use crate::params::ListingParameters;
use crate::schema::EntitySchema;
use crate::sort::SortSpec;

/// Everything a backend needs to fetch one page and count the total.
///
/// Fetch and count must both use [`CompiledListing::condition`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledListing {
    /// `None` if no filter constrains the result.
    pub condition: Option<Condition>,
    pub sort: SortSpec,
    pub page: PageSpec,
}

impl CompiledListing {
    /// Returns true if `record` passes the condition.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.condition
            .as_ref()
            .map_or(true, |condition| ConditionEvaluator::new(condition).matches(record))
    }
}

/// Compiles [`ListingParameters`] for one entity.
///
/// # Example
///
/// ```
/// use listing_query_rs::config::ListingConfig;
/// use listing_query_rs::params::ListingParameters;
/// use listing_query_rs::query::ListingQuery;
/// use listing_query_rs::schema::{AttributeSpec, EntitySchema, SemanticType};
///
/// let schema = EntitySchema::new()
///     .with_attribute("name", AttributeSpec::new(SemanticType::String))
///     .with_attribute("age", AttributeSpec::new(SemanticType::Integer));
/// let config = ListingConfig::default();
///
/// let params = ListingParameters::from_query("filter-age=>30&sort=-age&page=2").unwrap();
/// let compiled = ListingQuery::new(&schema, &config).compile(&params).unwrap();
///
/// assert_eq!(compiled.condition.unwrap().to_string(), "(age > 30)");
/// assert_eq!(compiled.page.offset, 10);
/// ```
#[derive(Debug)]
pub struct ListingQuery<'a> {
    schema: &'a EntitySchema,
    config: &'a ListingConfig,
    builder: TreeBuilder<'a>,
}

impl<'a> ListingQuery<'a> {
    /// Creates a query compiler for `schema`.
    pub fn new(schema: &'a EntitySchema, config: &'a ListingConfig) -> Self {
        Self {
            schema,
            config,
            builder: TreeBuilder::new(schema, config),
        }
    }

    /// The tree builder used for filters.
    pub fn builder(&self) -> &TreeBuilder<'a> {
        &self.builder
    }

    /// Compiles the filter, sort and pagination inputs.
    ///
    /// The condition is the conjunction of the global search, the attribute
    /// filters and the caller tree; parts that constrain nothing are left out.
    ///
    /// # Errors
    ///
    /// Returns `ListingError::UnknownSortAttribute` if the sort names an
    /// attribute not in the schema. Filters never cause an error.
    pub fn compile(&self, params: &ListingParameters) -> Result<CompiledListing> {
        let sort = match params.sort.as_deref() {
            Some(raw) => SortSpec::parse(raw, self.schema, self.config)?,
            None => SortSpec::default(),
        };
        let page = PageSpec::normalize(params.index, params.page, params.limit, self.config);

        let mut parts = Vec::with_capacity(3);
        if let Some(term) = params.filter.as_deref() {
            parts.extend(self.builder.build_global_search(term));
        }
        parts.extend(self.builder.build_from_map(&params.filter_attributes));
        if let Some(tree) = &params.predicate {
            parts.extend(self.builder.build_from_tree(tree));
        }
        let condition = Condition::conjunction(parts);

        tracing::debug!(
            leaves = condition.as_ref().map_or(0, Condition::leaf_count),
            sort_keys = sort.keys().len(),
            offset = page.offset,
            limit = page.limit,
            "compiled listing query"
        );

        Ok(CompiledListing {
            condition,
            sort,
            page,
        })
    }
}
