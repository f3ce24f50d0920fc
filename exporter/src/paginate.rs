//! Walks the listing page by page until the board runs dry.

use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use common::extract::{extract_jobs, ExtractOptions};
use common::{JobRecord, Site};
use scraper::Html;
use tracing::{error, info};

use crate::fetch::{full_description, JobBoard};

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub page_size: u32,
    /// Pause between listing pages.
    pub page_sleep: Duration,
    /// 0 means no ceiling.
    pub max_pages: u32,
    pub fetch_details: bool,
    /// Pause after each detail page.
    pub detail_sleep: Duration,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            page_size: 100,
            page_sleep: Duration::from_millis(600),
            max_pages: 0,
            fetch_details: true,
            detail_sleep: Duration::from_millis(200),
        }
    }
}

/// Everything accumulated during one export run.
#[derive(Debug, Default)]
pub struct Run {
    pub seen: HashSet<String>,
    pub jobs: Vec<JobRecord>,
}

/// Adds the page's unseen records to the run, enriching each with its
/// detail page when enabled. Returns how many were new.
pub fn absorb_page(
    run: &mut Run,
    records: Vec<JobRecord>,
    board: &impl JobBoard,
    options: &ExportOptions,
) -> usize {
    let mut new_count = 0;

    for mut job in records {
        if run.seen.contains(&job.link) {
            continue;
        }

        if options.fetch_details {
            let full = full_description(board, &job.link);
            if !full.is_empty() {
                job.description = full;
            }
            thread::sleep(options.detail_sleep);
        }

        run.seen.insert(job.link.clone());
        run.jobs.push(job);
        new_count += 1;
    }

    new_count
}

/// Collects every job on the board. A failed listing fetch ends the run
/// but keeps what was gathered so far.
pub fn scrape_all(board: &impl JobBoard, site: &Site, options: &ExportOptions) -> Vec<JobRecord> {
    let mut run = Run::default();
    let mut page = 1;

    loop {
        info!("Fetching page {} (PageSize={})...", page, options.page_size);

        let body = match board.fetch_listing(options.page_size, page) {
            Ok(body) => body,
            Err(e) => {
                error!("Error fetching page {}: {}", page, e);
                break;
            }
        };

        let document = Html::parse_document(&body);
        let records = extract_jobs(&document, site, &ExtractOptions::EXPORT);
        let found = records.len();
        let new_count = absorb_page(&mut run, records, board, options);

        info!(
            "  Found {} jobs on page, {} new (total {})",
            found,
            new_count,
            run.jobs.len()
        );

        if found == 0 || new_count == 0 {
            info!("No more new jobs found; stopping.");
            break;
        }

        page += 1;
        if options.max_pages > 0 && page > options.max_pages {
            info!("Reached max_pages={}; stopping.", options.max_pages);
            break;
        }

        thread::sleep(options.page_sleep);
    }

    run.jobs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fake::{link, listing, FakeBoard};

    fn quick(fetch_details: bool) -> ExportOptions {
        ExportOptions {
            page_sleep: Duration::ZERO,
            detail_sleep: Duration::ZERO,
            fetch_details,
            ..ExportOptions::default()
        }
    }

    fn links(jobs: &[JobRecord]) -> Vec<String> {
        jobs.iter().map(|j| j.link.clone()).collect()
    }

    #[test]
    fn test_stops_when_page_repeats() {
        let board = FakeBoard {
            pages: vec![listing(&[1, 2]), listing(&[3]), listing(&[3])],
            ..FakeBoard::default()
        };

        let jobs = scrape_all(&board, &Site::default(), &quick(false));

        assert_eq!(links(&jobs), vec![link(1), link(2), link(3)]);
        assert_eq!(board.listing_calls.get(), 3);
    }

    #[test]
    fn test_stops_on_empty_page() {
        let board = FakeBoard {
            pages: vec![listing(&[1]), listing(&[])],
            ..FakeBoard::default()
        };

        let jobs = scrape_all(&board, &Site::default(), &quick(false));

        assert_eq!(jobs.len(), 1);
        assert_eq!(board.listing_calls.get(), 2);
    }

    #[test]
    fn test_fetch_failure_keeps_partial_results() {
        // Page 2 does not exist, so the fake answers 503.
        let board = FakeBoard {
            pages: vec![listing(&[1, 2])],
            ..FakeBoard::default()
        };

        let jobs = scrape_all(&board, &Site::default(), &quick(false));

        assert_eq!(links(&jobs), vec![link(1), link(2)]);
        assert_eq!(board.listing_calls.get(), 2);
    }

    #[test]
    fn test_max_pages_ceiling() {
        let board = FakeBoard {
            pages: vec![listing(&[1]), listing(&[2]), listing(&[3])],
            ..FakeBoard::default()
        };
        let options = ExportOptions {
            max_pages: 2,
            ..quick(false)
        };

        let jobs = scrape_all(&board, &Site::default(), &options);

        assert_eq!(links(&jobs), vec![link(1), link(2)]);
        assert_eq!(board.listing_calls.get(), 2);
    }

    #[test]
    fn test_partial_overlap_keeps_going() {
        let board = FakeBoard {
            pages: vec![listing(&[1, 2]), listing(&[2, 3]), listing(&[3])],
            ..FakeBoard::default()
        };

        let jobs = scrape_all(&board, &Site::default(), &quick(false));

        assert_eq!(links(&jobs), vec![link(1), link(2), link(3)]);
    }

    #[test]
    fn test_details_replace_snippet() {
        let mut board = FakeBoard {
            pages: vec![listing(&[1, 2]), listing(&[1, 2])],
            ..FakeBoard::default()
        };
        board
            .details
            .insert(link(1), "<main>Full posting for job one</main>".to_string());

        let jobs = scrape_all(&board, &Site::default(), &quick(true));

        assert_eq!(jobs[0].description, "Full posting for job one");
        // Detail page for job 2 fails, so the listing snippet stays.
        assert_eq!(jobs[1].description, "Snippet 2");
        // Repeated links on page 2 are not fetched again.
        assert_eq!(board.detail_calls.get(), 2);
    }

    #[test]
    fn test_no_details_leaves_snippet() {
        let board = FakeBoard {
            pages: vec![listing(&[4])],
            ..FakeBoard::default()
        };

        let jobs = scrape_all(&board, &Site::default(), &quick(false));

        assert_eq!(jobs[0].description, "Snippet 4");
        assert_eq!(jobs[0].id, "4");
        assert_eq!(board.detail_calls.get(), 0);
    }

    #[test]
    fn test_absorb_page_threads_seen_set() {
        let board = FakeBoard::default();
        let mut run = Run::default();
        run.seen.insert(link(1));

        let records = vec![
            JobRecord {
                link: link(1),
                ..JobRecord::default()
            },
            JobRecord {
                link: link(2),
                ..JobRecord::default()
            },
        ];

        let new_count = absorb_page(&mut run, records, &board, &quick(false));

        assert_eq!(new_count, 1);
        assert_eq!(links(&run.jobs), vec![link(2)]);
        assert!(run.seen.contains(&link(2)));
    }
}
