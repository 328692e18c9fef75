use std::fmt;

use quern_primitives::Key;

use super::RecipeIndex;

/// How many processes the summary lists individually.
const TOP_PROCESSES: usize = 5;

/// Counts describing the contents of a [`RecipeIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
	pub recipes: usize,
	pub processes: usize,
	pub results: usize,
	pub ingredients: usize,
	pub others: usize,
	/// Largest processes by recipe count, largest first, ties by process order.
	pub top_processes: Vec<(Key, usize)>,
}

impl fmt::Display for IndexSummary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} recipes in {} processes ({} results, {} ingredients, {} others)",
			self.recipes, self.processes, self.results, self.ingredients, self.others
		)
	}
}

impl RecipeIndex {
	pub fn summary(&self) -> IndexSummary {
		let mut top_processes: Vec<(Key, usize)> = self
			.by_process
			.processes()
			.into_iter()
			.filter_map(|p| self.by_process.set(&p).map(|set| (p.key().clone(), set.len())))
			.collect();
		// stable sort keeps process order among equal counts
		top_processes.sort_by(|a, b| b.1.cmp(&a.1));
		top_processes.truncate(TOP_PROCESSES);

		IndexSummary {
			recipes: self.len(),
			processes: self.by_process.process_count(),
			results: self.by_result.load().len(),
			ingredients: self.by_ingredient.load().len(),
			others: self.by_other.load().len(),
			top_processes,
		}
	}

	/// Logs the summary at info level.
	pub fn log_summary(&self) {
		let summary = self.summary();
		tracing::info!(
			recipes = summary.recipes,
			processes = summary.processes,
			results = summary.results,
			ingredients = summary.ingredients,
			others = summary.others,
			"recipe index built"
		);
		for (process, count) in &summary.top_processes {
			tracing::info!(process = %process, recipes = count, "indexed process");
		}
	}
}
