//! Sample inputs served by `GET /api/v1/review/sample` for trying the service.

use serde::Serialize;

pub const SAMPLE_TARGET_ROLE: &str = "Backend Engineer";

pub const SAMPLE_RESUME: &str = "\
Jane Smith
Backend Engineer
jane.smith@example.com | (555) 010-2030 | linkedin.com/in/janesmith

Summary
Backend engineer with 5 years of Python experience building APIs and data pipelines.

Experience
Senior Backend Engineer | Acme Corp | Mar 2021 - Present
- Built REST APIs in Django serving the mobile app.
- Moved nightly batch jobs to Celery workers.
- Reviewed pull requests for the payments team.

Backend Engineer | Initech | Jun 2019 - Feb 2021
- Maintained Flask services and PostgreSQL schemas.
- Wrote integration tests for billing.

Education
BSc Computer Science | State University | 2015 - 2019

Skills
Languages: Python, SQL, Bash
Frameworks: Django, Flask, Celery
Data: PostgreSQL, Redis
";

pub const SAMPLE_JOB_DESCRIPTION: &str = "\
We are hiring a Backend Engineer to scale our order platform.

Responsibilities:
- Design and operate Python services handling thousands of requests per second.
- Own service reliability: monitoring, on-call, incident reviews.
- Partner with product and data teams on new features.

Requirements:
- 4+ years building production backend services in Python or Go.
- Strong PostgreSQL and caching experience.
- Familiarity with Docker, Kubernetes and CI/CD pipelines.
- Experience with event streaming (Kafka or similar) is a plus.
";

#[derive(Debug, Serialize)]
pub struct SampleInput {
    pub resume_text: &'static str,
    pub target_role: &'static str,
    pub job_description: &'static str,
}

pub fn sample_input() -> SampleInput {
    SampleInput {
        resume_text: SAMPLE_RESUME,
        target_role: SAMPLE_TARGET_ROLE,
        job_description: SAMPLE_JOB_DESCRIPTION,
    }
}
