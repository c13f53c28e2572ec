//! Pure filters layered over store state for page rendering. Stateless,
//! order-preserving, recomputed on every call.

use crate::models::{
    Enrollment, JobPosting, JobResponse, JobStatus, Participation, PortfolioPost,
};

pub fn jobs_for_employer<'a>(jobs: &'a [JobPosting], employer_id: &str) -> Vec<&'a JobPosting> {
    jobs.iter().filter(|j| j.employer_id == employer_id).collect()
}

pub fn jobs_with_status(jobs: &[JobPosting], status: JobStatus) -> Vec<&JobPosting> {
    jobs.iter().filter(|j| j.status == status).collect()
}

pub fn responses_for_job<'a>(responses: &'a [JobResponse], job_id: &str) -> Vec<&'a JobResponse> {
    responses.iter().filter(|r| r.job_id == job_id).collect()
}

pub fn responses_for_applicant<'a>(
    responses: &'a [JobResponse],
    applicant_id: &str,
) -> Vec<&'a JobResponse> {
    responses.iter().filter(|r| r.applicant_id == applicant_id).collect()
}

pub fn participations_for_event<'a>(
    participations: &'a [Participation],
    event_id: &str,
) -> Vec<&'a Participation> {
    participations.iter().filter(|p| p.event_id == event_id).collect()
}

pub fn enrollments_for_user<'a>(
    enrollments: &'a [Enrollment],
    user_id: &str,
) -> Vec<&'a Enrollment> {
    enrollments.iter().filter(|e| e.user_id == user_id).collect()
}

pub fn posts_for_author<'a>(posts: &'a [PortfolioPost], author_id: &str) -> Vec<&'a PortfolioPost> {
    posts.iter().filter(|p| p.author_id == author_id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResponseStatus;
    use chrono::Utc;

    fn response(job_id: &str, applicant_id: &str) -> JobResponse {
        JobResponse {
            id: format!("{job_id}/{applicant_id}"),
            job_id: job_id.into(),
            applicant_id: applicant_id.into(),
            status: ResponseStatus::Sent,
            employer_comment: None,
            created_at: Utc::now(),
            viewed_at: None,
        }
    }

    #[test]
    fn applicant_filter_is_exact_and_order_preserving() {
        let responses = vec![
            response("j1", "a1"),
            response("j2", "a2"),
            response("j3", "a1"),
            response("j4", "a3"),
        ];
        let mine = responses_for_applicant(&responses, "a1");
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].job_id, "j1");
        assert_eq!(mine[1].job_id, "j3");
        assert!(responses_for_applicant(&responses, "a9").is_empty());
    }
}
