use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use std::io::stdout;

use crate::models::{Applicant, ApplicantStatus, Education, JobStatus, UserStatus};
use crate::report;
use crate::store::{ApplicantFilter, ApplicantStore, JobFilter, JobStore, UserStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Overview,
    Jobs,
    Applicants,
    Users,
}

impl Page {
    const ALL: [Self; 4] = [Self::Overview, Self::Jobs, Self::Applicants, Self::Users];

    fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Jobs => "Jobs",
            Self::Applicants => "Applicants",
            Self::Users => "Users",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Overview => Self::Jobs,
            Self::Jobs => Self::Applicants,
            Self::Applicants => Self::Users,
            Self::Users => Self::Overview,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Overview => Self::Users,
            Self::Jobs => Self::Overview,
            Self::Applicants => Self::Jobs,
            Self::Users => Self::Applicants,
        }
    }
}

struct App {
    jobs: JobStore,
    applicants: ApplicantStore,
    users: UserStore,
    page: Page,
    filter: ApplicantFilter,
    applicant_selected: usize,
    job_selected: usize,
    user_selected: usize,
    scroll_offset: u16,
}

impl App {
    fn new(jobs: JobStore, applicants: ApplicantStore, users: UserStore) -> Self {
        Self {
            jobs,
            applicants,
            users,
            page: Page::Overview,
            filter: ApplicantFilter::default(),
            applicant_selected: 0,
            job_selected: 0,
            user_selected: 0,
            scroll_offset: 0,
        }
    }

    fn visible_applicants(&self) -> Vec<&Applicant> {
        self.applicants.filtered(&self.filter)
    }

    fn list_len(&self) -> usize {
        match self.page {
            Page::Overview => 0,
            Page::Jobs => self.jobs.all().len(),
            Page::Applicants => self.visible_applicants().len(),
            Page::Users => self.users.all().len(),
        }
    }

    fn selected(&self) -> usize {
        match self.page {
            Page::Overview => 0,
            Page::Jobs => self.job_selected,
            Page::Applicants => self.applicant_selected,
            Page::Users => self.user_selected,
        }
    }

    fn set_selected(&mut self, value: usize) {
        match self.page {
            Page::Overview => {}
            Page::Jobs => self.job_selected = value,
            Page::Applicants => self.applicant_selected = value,
            Page::Users => self.user_selected = value,
        }
        self.scroll_offset = 0;
    }

    fn next_row(&mut self) {
        let len = self.list_len();
        let selected = self.selected();
        if len > 0 && selected < len - 1 {
            self.set_selected(selected + 1);
        }
    }

    fn prev_row(&mut self) {
        let selected = self.selected();
        if selected > 0 {
            self.set_selected(selected - 1);
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.list_len();
        let selected = self.selected();
        if len == 0 {
            self.set_selected(0);
        } else if selected >= len {
            self.set_selected(len - 1);
        }
    }

    /// Advance the job filter: all postings, then each posting in turn.
    fn cycle_job_filter(&mut self) {
        let ids: Vec<&str> = self.jobs.all().iter().map(|j| j.id.as_str()).collect();
        self.filter.job = match &self.filter.job {
            JobFilter::All => match ids.first() {
                Some(id) => JobFilter::Job((*id).to_string()),
                None => JobFilter::All,
            },
            JobFilter::Job(current) => match ids.iter().position(|id| *id == current) {
                Some(pos) if pos + 1 < ids.len() => JobFilter::Job(ids[pos + 1].to_string()),
                _ => JobFilter::All,
            },
        };
        self.applicant_selected = 0;
        self.scroll_offset = 0;
    }

    fn cycle_education_filter(&mut self) {
        self.filter.education = match self.filter.education {
            None => Some(Education::Bachelors),
            Some(Education::Bachelors) => Some(Education::Masters),
            Some(Education::Masters) => Some(Education::Phd),
            Some(Education::Phd) => None,
        };
        self.applicant_selected = 0;
        self.scroll_offset = 0;
    }

    fn set_selected_applicant_status(&mut self, status: ApplicantStatus) {
        let id = self
            .visible_applicants()
            .get(self.applicant_selected)
            .map(|a| a.id.clone());
        if let Some(id) = id {
            // id was just read out of this store, so the lookup cannot fail.
            let _ = self.applicants.set_status(&id, status);
        }
        self.clamp_selection();
    }

    fn toggle_selected_user(&mut self) {
        let id = self
            .users
            .all()
            .get(self.user_selected)
            .map(|u| u.id.clone());
        if let Some(id) = id {
            // id was just read out of this store, so the lookup cannot fail.
            let _ = self.users.toggle_status(&id);
        }
    }

    fn job_filter_label(&self) -> String {
        match &self.filter.job {
            JobFilter::All => "all".to_string(),
            JobFilter::Job(id) => self
                .jobs
                .get(id)
                .map(|j| j.title.clone())
                .unwrap_or_else(|| format!("#{}", id)),
        }
    }
}

pub fn run(jobs: JobStore, applicants: ApplicantStore, users: UserStore) -> Result<()> {
    let mut app = App::new(jobs, applicants, users);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Tab => app.page = app.page.next(),
                KeyCode::BackTab => app.page = app.page.prev(),
                KeyCode::Char('1') => app.page = Page::Overview,
                KeyCode::Char('2') => app.page = Page::Jobs,
                KeyCode::Char('3') => app.page = Page::Applicants,
                KeyCode::Char('4') => app.page = Page::Users,
                KeyCode::Down | KeyCode::Char('j') => app.next_row(),
                KeyCode::Up | KeyCode::Char('k') => app.prev_row(),
                KeyCode::Char('J') | KeyCode::PageDown => {
                    app.scroll_offset = app.scroll_offset.saturating_add(3);
                }
                KeyCode::Char('K') | KeyCode::PageUp => {
                    app.scroll_offset = app.scroll_offset.saturating_sub(3);
                }
                KeyCode::Char('f') if app.page == Page::Applicants => app.cycle_job_filter(),
                KeyCode::Char('e') if app.page == Page::Applicants => app.cycle_education_filter(),
                KeyCode::Char('n') if app.page == Page::Applicants => {
                    app.set_selected_applicant_status(ApplicantStatus::New)
                }
                KeyCode::Char('s') if app.page == Page::Applicants => {
                    app.set_selected_applicant_status(ApplicantStatus::Screening)
                }
                KeyCode::Char('i') if app.page == Page::Applicants => {
                    app.set_selected_applicant_status(ApplicantStatus::Interview)
                }
                KeyCode::Char('l') if app.page == Page::Applicants => {
                    app.set_selected_applicant_status(ApplicantStatus::Shortlisted)
                }
                KeyCode::Char('x') if app.page == Page::Applicants => {
                    app.set_selected_applicant_status(ApplicantStatus::Rejected)
                }
                KeyCode::Char('t') if app.page == Page::Users => app.toggle_selected_user(),
                _ => {}
            }
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let titles: Vec<&str> = Page::ALL.iter().map(|p| p.title()).collect();
    let selected = Page::ALL.iter().position(|p| *p == app.page).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .divider(" | ");
    frame.render_widget(tabs, chunks[0]);

    match app.page {
        Page::Overview => draw_overview(frame, app, chunks[1]),
        Page::Jobs => draw_jobs(frame, app, chunks[1]),
        Page::Applicants => draw_applicants(frame, app, chunks[1]),
        Page::Users => draw_users(frame, app, chunks[1]),
    }

    let help = match app.page {
        Page::Overview => " Tab/1-4:pages  q:quit",
        Page::Jobs => " Tab/1-4:pages  j/k:navigate  q:quit",
        Page::Applicants => {
            " j/k:navigate  f:job filter  e:education  n/s/i/l/x:set status  J/K:scroll  q:quit"
        }
        Page::Users => " j/k:navigate  t:toggle active  q:quit",
    };
    let help = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);
}

fn draw_overview(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let kpi = report::kpi_summary(&app.jobs, &app.applicants);
    let stats = report::quick_stats(&app.applicants);

    let mut left: Vec<Line> = Vec::new();
    left.push(Line::from(Span::styled(
        "Recruitment Pipeline",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    left.push(Line::from(""));
    left.push(Line::from(format!("Total Jobs        {}", kpi.total_jobs)));
    left.push(Line::from(format!(
        "Total Applicants  {}",
        kpi.total_applicants
    )));
    left.push(Line::from(format!(
        "Shortlisted       {}  ({:.1}% of total)",
        kpi.shortlisted,
        kpi.shortlisted_share()
    )));
    left.push(Line::from(""));
    left.push(Line::from(Span::styled(
        "Quick Stats",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    left.push(Line::from(format!(
        "New applications  {}",
        stats.new_applications
    )));
    left.push(Line::from(format!("Shortlisted       {}", stats.shortlisted)));
    left.push(Line::from(format!("Rejected          {}", stats.rejected)));

    let left_widget = Paragraph::new(Text::from(left))
        .block(Block::default().borders(Borders::ALL).title(" Dashboard "));
    frame.render_widget(left_widget, columns[0]);

    let mut right: Vec<Line> = Vec::new();
    right.push(Line::from(Span::styled(
        "Applicants per Job",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for (title, count) in report::applicants_per_job(&app.jobs, &app.applicants) {
        let bar = "█".repeat(count * 4);
        right.push(Line::from(format!(
            "{:<28} {} {}",
            truncate(&title, 26),
            bar,
            count
        )));
    }
    right.push(Line::from(""));
    right.push(Line::from(Span::styled(
        "Status Distribution",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for (status, count) in report::status_distribution(&app.applicants) {
        right.push(Line::from(vec![
            Span::styled(format!("{:<12}", status.label()), status_style(status)),
            Span::raw(format!("{} {}", "█".repeat(count * 4), count)),
        ]));
    }

    let right_widget = Paragraph::new(Text::from(right))
        .block(Block::default().borders(Borders::ALL).title(" Activity "));
    frame.render_widget(right_widget, columns[1]);
}

fn draw_jobs(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let items: Vec<ListItem> = app
        .jobs
        .all()
        .iter()
        .map(|job| {
            let icon = match job.status {
                JobStatus::Active => "+",
                JobStatus::Paused => "*",
                JobStatus::Closed => "-",
            };
            ListItem::new(format!(
                "{} {} | {}",
                icon,
                truncate(&job.title, 30),
                job.department
            ))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Jobs ({}) ", app.jobs.all().len())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(app.job_selected));
    frame.render_stateful_widget(list, chunks[0], &mut list_state);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(job) = app.jobs.all().get(app.job_selected) {
        lines.push(Line::from(Span::styled(
            job.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("Department: {}", job.department)));
        lines.push(Line::from(format!("Location:   {}", job.location)));
        lines.push(Line::from(format!("Status:     {}", job.status)));
        lines.push(Line::from(format!("Applicants: {}", job.applicants)));
        lines.push(Line::from(format!("Created:    {}", job.created_at)));
    } else {
        lines.push(Line::from("No job selected"));
    }
    let detail = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(" Detail "))
        .wrap(Wrap { trim: false });
    frame.render_widget(detail, chunks[1]);
}

fn draw_applicants(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let visible = app.visible_applicants();
    let items: Vec<ListItem> = visible
        .iter()
        .map(|applicant| {
            let icon = match applicant.status {
                ApplicantStatus::New => " ",
                ApplicantStatus::Screening => "*",
                ApplicantStatus::Interview => "?",
                ApplicantStatus::Shortlisted => "+",
                ApplicantStatus::Rejected => "x",
            };
            ListItem::new(format!(
                "{} {} | {}",
                icon,
                truncate(&applicant.name, 20),
                truncate(&applicant.job_title, 24)
            ))
        })
        .collect();

    let education_label = app
        .filter
        .education
        .map(|e| e.to_string())
        .unwrap_or_else(|| "all".to_string());
    let title = format!(
        " Applicants ({}/{})  job:{} edu:{} ",
        visible.len(),
        app.applicants.all().len(),
        truncate(&app.job_filter_label(), 20),
        education_label
    );

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(app.applicant_selected));
    frame.render_stateful_widget(list, chunks[0], &mut list_state);

    let detail = build_applicant_detail(&visible, app.applicant_selected);
    let detail_widget = Paragraph::new(detail)
        .block(Block::default().borders(Borders::ALL).title(" Profile "))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_offset, 0));
    frame.render_widget(detail_widget, chunks[1]);
}

fn build_applicant_detail<'a>(visible: &[&'a Applicant], selected: usize) -> Text<'a> {
    let Some(applicant) = visible.get(selected) else {
        return Text::raw("No applicants match the current filters");
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        applicant.name.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(applicant.job_title.as_str()));
    lines.push(Line::from(Span::styled(
        format!("Status: {}", applicant.status),
        status_style(applicant.status),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("Score:      "),
        Span::styled(
            format!("{}%", applicant.score),
            score_style(applicant.score),
        ),
    ]));
    lines.push(Line::from(format!(
        "Education:  {} Degree",
        applicant.education
    )));
    lines.push(Line::from(format!(
        "Experience: {} years",
        applicant.experience
    )));
    lines.push(Line::from(format!("Email:      {}", applicant.email)));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Resume Summary",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for line in textwrap::fill(&applicant.resume_summary, 70).lines() {
        lines.push(Line::from(format!("  {}", line)));
    }

    Text::from(lines)
}

fn draw_users(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let items: Vec<ListItem> = app
        .users
        .all()
        .iter()
        .map(|user| {
            let icon = match user.status {
                UserStatus::Active => "+",
                UserStatus::Inactive => "-",
            };
            ListItem::new(format!(
                "{} {} | {}",
                icon,
                truncate(&user.name, 20),
                user.role
            ))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Users ({}) ", app.users.all().len())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(app.user_selected));
    frame.render_stateful_widget(list, chunks[0], &mut list_state);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(user) = app.users.all().get(app.user_selected) {
        lines.push(Line::from(Span::styled(
            user.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("Email:       {}", user.email)));
        lines.push(Line::from(format!("Role:        {}", user.role)));
        let style = match user.status {
            UserStatus::Active => Style::default().fg(Color::Green),
            UserStatus::Inactive => Style::default().fg(Color::DarkGray),
        };
        lines.push(Line::from(Span::styled(
            format!("Status:      {}", user.status),
            style,
        )));
        lines.push(Line::from(format!("Last active: {}", user.last_active)));
    } else {
        lines.push(Line::from("No user selected"));
    }
    let detail = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(" Detail "))
        .wrap(Wrap { trim: false });
    frame.render_widget(detail, chunks[1]);
}

fn status_style(status: ApplicantStatus) -> Style {
    match status {
        ApplicantStatus::New => Style::default().fg(Color::Green),
        ApplicantStatus::Screening => Style::default().fg(Color::Magenta),
        ApplicantStatus::Interview => Style::default().fg(Color::Yellow),
        ApplicantStatus::Shortlisted => Style::default().fg(Color::Cyan),
        ApplicantStatus::Rejected => Style::default().fg(Color::Red),
    }
}

fn score_style(score: u8) -> Style {
    if score >= 90 {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else if score >= 75 {
        Style::default().fg(Color::Cyan)
    } else if score >= 60 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Red)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    // Back off to a char boundary so multibyte text never splits mid-char.
    let mut cut = max.saturating_sub(3);
    while cut > 0 && !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &s[..cut])
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn test_truncate_backs_off_to_char_boundary() {
        assert_eq!(truncate("Zürich – Bäckerstrasse 12", 13), "Zürich ...");
        assert_eq!(truncate("plain ascii location", 10), "plain a...");
    }
}
